//! Chunking strategies: size-bounded windows, heading sections, principle sections.

use regintel_core::config::ChunkingConfig;
use regintel_core::{Chunk, Document, RegIntelError};
use tracing::debug;

use super::headings::{split_blocks, HeadingMatcher, PrincipleMatcher};
use super::helpers::{merge_blocks, normalize_text, split_windows};
use super::types::{ChunkConfig, ChunkStrategy};

/// Appends pieces to `chunks`, numbering them after the existing ones.
fn push_pieces(chunks: &mut Vec<Chunk>, source: &str, pieces: Vec<String>) {
    for text in pieces {
        let chunk_index = chunks.len();
        chunks.push(Chunk {
            text,
            source: source.to_string(),
            chunk_index,
        });
    }
}

// ── Size-bounded strategy ───────────────────────────────────────────────────

/// Normalize `text` and cut it into overlapping windows of at most
/// `max_chars` characters. Empty text yields no chunks.
pub fn chunk_by_size(text: &str, source: &str, max_chars: usize, overlap: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    if text.is_empty() {
        return chunks;
    }
    let normalized = normalize_text(text);
    push_pieces(&mut chunks, source, split_windows(&normalized, max_chars, overlap));
    chunks
}

// ── Heading strategy ────────────────────────────────────────────────────────

/// Split by structural headings, merge tiny sections, then enforce
/// `max_chars` on every rendered section. Falls back to [`chunk_by_size`]
/// when the sections carry no content.
pub fn chunk_by_headings(
    text: &str,
    source: &str,
    headings: &HeadingMatcher,
    config: &ChunkConfig,
) -> Vec<Chunk> {
    if text.is_empty() {
        return Vec::new();
    }
    let normalized = normalize_text(text);
    let raw_blocks = split_blocks(&normalized, headings);
    let raw_count = raw_blocks.len();
    let blocks = merge_blocks(raw_blocks, config.min_section_chars);

    let mut chunks = Vec::new();
    for block in &blocks {
        let full = block.render();
        if full.trim().is_empty() {
            continue;
        }
        push_pieces(&mut chunks, source, split_windows(&full, config.max_chars, config.overlap));
    }

    if chunks.is_empty() {
        debug!(source, "no sectioned content, falling back to windows");
        return chunk_by_size(text, source, config.max_chars, config.overlap);
    }
    debug!(
        source,
        raw_blocks = raw_count,
        merged_blocks = blocks.len(),
        chunks = chunks.len(),
        "heading chunking complete"
    );
    chunks
}

// ── Principle strategy ──────────────────────────────────────────────────────

/// One chunk per "Principle N" section, re-split only when a section exceeds
/// `principle_max_chars`. Documents without principle headings (or whose
/// sections are all blank) are delegated to [`chunk_by_headings`].
pub fn chunk_by_principles(
    text: &str,
    source: &str,
    principles: &PrincipleMatcher,
    headings: &HeadingMatcher,
    config: &ChunkConfig,
) -> Vec<Chunk> {
    if text.is_empty() {
        return Vec::new();
    }
    let normalized = normalize_text(text);
    let starts = principles.section_starts(&normalized);
    if starts.is_empty() {
        debug!(source, "no principle headings, delegating to heading chunker");
        return chunk_by_headings(text, source, headings, config);
    }

    let mut chunks = Vec::new();
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(normalized.len());
        let section = normalized[start..end].trim();
        if section.is_empty() {
            continue;
        }
        if section.chars().count() <= config.principle_max_chars {
            push_pieces(&mut chunks, source, vec![section.to_string()]);
        } else {
            let pieces = split_windows(section, config.principle_max_chars, config.principle_overlap);
            push_pieces(&mut chunks, source, pieces);
        }
    }

    if chunks.is_empty() {
        return chunk_by_headings(text, source, headings, config);
    }
    debug!(source, sections = starts.len(), chunks = chunks.len(), "principle chunking complete");
    chunks
}

// ── Chunker ─────────────────────────────────────────────────────────────────

/// Compiled matchers plus size settings, shared across documents.
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkConfig,
    headings: HeadingMatcher,
    principles: PrincipleMatcher,
}

impl Chunker {
    pub fn new(
        config: ChunkConfig,
        headings: HeadingMatcher,
        principles: PrincipleMatcher,
    ) -> Result<Self, RegIntelError> {
        if config.max_chars == 0 || config.principle_max_chars == 0 {
            return Err(RegIntelError::MalformedConfiguration(
                "chunk sizes must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            config,
            headings,
            principles,
        })
    }

    /// Built-in heading patterns with the configured sizes and principle prefixes.
    pub fn from_config(cfg: &ChunkingConfig) -> Result<Self, RegIntelError> {
        Self::new(
            ChunkConfig::from(cfg),
            HeadingMatcher::regulatory()?,
            PrincipleMatcher::new(&cfg.principle_prefixes)?,
        )
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    pub fn chunk(&self, doc: &Document, strategy: ChunkStrategy) -> Vec<Chunk> {
        match strategy {
            ChunkStrategy::Window => self.by_size(&doc.raw_text, &doc.filename),
            ChunkStrategy::Headings => self.by_headings(&doc.raw_text, &doc.filename),
            ChunkStrategy::Principles => self.by_principles(&doc.raw_text, &doc.filename),
        }
    }

    pub fn by_size(&self, text: &str, source: &str) -> Vec<Chunk> {
        chunk_by_size(text, source, self.config.max_chars, self.config.overlap)
    }

    pub fn by_headings(&self, text: &str, source: &str) -> Vec<Chunk> {
        chunk_by_headings(text, source, &self.headings, &self.config)
    }

    pub fn by_principles(&self, text: &str, source: &str) -> Vec<Chunk> {
        chunk_by_principles(text, source, &self.principles, &self.headings, &self.config)
    }
}
