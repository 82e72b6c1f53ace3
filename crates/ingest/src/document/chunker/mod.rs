//! Structure-aware chunking engine for regulatory texts.
//!
//! Three strategies share one normalization and windowing core:
//! fixed-size windows, heading-based sections (multilingual heading patterns,
//! small sections merged), and principle-aware sections for documents built
//! around numbered "Principle N" headings. Every strategy falls back to the
//! simpler one below it, so non-empty input always yields at least one chunk.

mod headings;
mod helpers;
mod router;
mod strategies;
mod types;

pub use headings::{split_blocks, HeadingMatcher, PrincipleMatcher, DEFAULT_HEADING_PATTERNS};
pub use helpers::{merge_blocks, normalize_text};
pub use router::StrategyRouter;
pub use strategies::{chunk_by_headings, chunk_by_principles, chunk_by_size, Chunker};
pub use types::{Block, ChunkConfig, ChunkStrategy};

#[cfg(test)]
mod tests;
