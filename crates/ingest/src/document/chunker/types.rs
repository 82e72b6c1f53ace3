//! Chunk configuration and intermediate types.

use std::fmt;
use std::str::FromStr;

use regintel_core::config::ChunkingConfig;

// ── Configuration ───────────────────────────────────────────────────────────

/// Size settings threaded through every chunking call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum characters per chunk (default: 1800).
    pub max_chars: usize,
    /// Characters shared by adjacent windows (default: 200).
    pub overlap: usize,
    /// Sections rendered shorter than this are merged with the next (default: 600).
    pub min_section_chars: usize,
    /// Maximum characters of a principle section before it is re-split (default: 2200).
    pub principle_max_chars: usize,
    /// Overlap used when re-splitting a principle section (default: 200).
    pub principle_overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::from(&ChunkingConfig::default())
    }
}

impl From<&ChunkingConfig> for ChunkConfig {
    fn from(cfg: &ChunkingConfig) -> Self {
        Self {
            max_chars: cfg.max_chars,
            overlap: cfg.overlap,
            min_section_chars: cfg.min_section_chars,
            principle_max_chars: cfg.principle_max_chars,
            principle_overlap: cfg.principle_overlap,
        }
    }
}

// ── Blocks ──────────────────────────────────────────────────────────────────

/// A heading-delimited section, alive only while chunking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub title: Option<String>,
    pub body: String,
}

impl Block {
    pub fn new(title: Option<String>, body: impl Into<String>) -> Self {
        Self {
            title,
            body: body.into(),
        }
    }

    /// `title + "\n" + body`, or the bare body for untitled blocks.
    pub fn render(&self) -> String {
        match &self.title {
            Some(title) => format!("{title}\n{}", self.body),
            None => self.body.clone(),
        }
    }

    /// Length of [`Block::render`] in characters.
    pub fn rendered_len(&self) -> usize {
        let body = self.body.chars().count();
        match &self.title {
            Some(title) => title.chars().count() + 1 + body,
            None => body,
        }
    }
}

// ── Strategy ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkStrategy {
    /// Fixed-size overlapping windows.
    Window,
    /// Heading sections, merged and size-bounded.
    Headings,
    /// "Principle N" sections, falling back to headings.
    Principles,
}

impl fmt::Display for ChunkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkStrategy::Window => write!(f, "window"),
            ChunkStrategy::Headings => write!(f, "headings"),
            ChunkStrategy::Principles => write!(f, "principles"),
        }
    }
}

impl FromStr for ChunkStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "window" | "size" => Ok(ChunkStrategy::Window),
            "headings" | "heading" => Ok(ChunkStrategy::Headings),
            "principles" | "principle" => Ok(ChunkStrategy::Principles),
            other => Err(format!("unknown chunk strategy: {other}")),
        }
    }
}
