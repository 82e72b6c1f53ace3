//! Document ingestion for the regulatory corpus.
//!
//! - Extraction adapters turning uploaded bytes into text (txt, md, csv, pdf)
//! - Normalization and structure-aware chunking (windows, headings, principles)
//! - Batch ingestion producing index records keyed `{source}-{chunk_index}`

pub mod document;
pub mod pipeline;

pub use document::chunker::{
    chunk_by_headings, chunk_by_principles, chunk_by_size, normalize_text, ChunkConfig,
    ChunkStrategy, Chunker, HeadingMatcher, PrincipleMatcher, StrategyRouter,
};
pub use document::{extract_text, load_folder, ExtractedDocument, ExtractionError};
pub use pipeline::{ingest, IngestReport, SkipReason, SkippedDocument, SourceSummary};
