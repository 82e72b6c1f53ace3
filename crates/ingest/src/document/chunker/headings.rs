//! Heading recognition: generic multilingual section headings and
//! start-anchored "Principle N" headings.

use regex::{Regex, RegexBuilder};
use regintel_core::RegIntelError;

use super::types::Block;

/// Default heading alternatives (English and French). Each one may be
/// followed by free text on the same line.
pub const DEFAULT_HEADING_PATTERNS: &[&str] = &[
    r"(bcbs\s+principle)\s+\d{1,2}\b.*",
    r"(principle|principe)\s+\d{1,2}\b.*",
    r"(article|art\.)\s+\d+[a-z]?\b.*",
    r"(section)\s+\d+(?:\.\d+)*\b.*",
    r"(chapter|chapitre)\s+\d+(?:\.\d+)*\b.*",
    r"(annex|annexe|appendix|appendice)\b.*",
    r"(requirement|exigence)\b.*",
    r"(policy|politique)\b.*",
    r"(guideline|lignes? directrices?|directive)\b.*",
    r"(scope|p[ée]rim[èe]tre)\b.*",
    r"(definitions?|d[ée]finitions?)\b.*",
    r"(objective|objectif[s]?)\b.*",
    r"(control[s]?|contr[ôo]le[s]?)\b.*",
];

/// Whole-line, case-insensitive heading detector built from a pattern set.
#[derive(Debug, Clone)]
pub struct HeadingMatcher {
    regex: Regex,
}

impl HeadingMatcher {
    /// Compile a pattern set. An empty or invalid set is a configuration error.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, RegIntelError> {
        if patterns.is_empty() {
            return Err(RegIntelError::MalformedConfiguration(
                "heading pattern set is empty".to_string(),
            ));
        }
        let alternatives = patterns
            .iter()
            .map(|p| format!("(?:{})", p.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let source = format!(r"^\s*(?:{alternatives})\s*$");
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                RegIntelError::MalformedConfiguration(format!("invalid heading pattern: {e}"))
            })?;
        Ok(Self { regex })
    }

    /// The built-in regulatory pattern set.
    pub fn regulatory() -> Result<Self, RegIntelError> {
        Self::new(DEFAULT_HEADING_PATTERNS)
    }

    pub fn is_heading(&self, line: &str) -> bool {
        self.regex.is_match(line.trim())
    }
}

/// Partition normalized text into `(title, body)` blocks.
///
/// A heading line closes the current block and opens a new one titled with
/// the trimmed line. The leading untitled block is only emitted when it holds
/// at least one line; the final block is always emitted.
pub fn split_blocks(text: &str, matcher: &HeadingMatcher) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut title: Option<String> = None;
    let mut lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if matcher.is_heading(trimmed) {
            if title.is_some() || !lines.is_empty() {
                blocks.push(Block::new(title.take(), lines.join("\n").trim()));
            }
            title = Some(trimmed.to_string());
            lines.clear();
        } else {
            lines.push(line);
        }
    }
    blocks.push(Block::new(title, lines.join("\n").trim()));
    blocks
}

/// Start-anchored "Principle N" detector with optional framework prefixes.
///
/// Unlike [`HeadingMatcher`] the line only has to *start* with the heading,
/// so inline titles such as "Principle 3 - Accuracy and integrity" qualify.
#[derive(Debug, Clone)]
pub struct PrincipleMatcher {
    regex: Regex,
}

impl PrincipleMatcher {
    pub fn new<S: AsRef<str>>(prefixes: &[S]) -> Result<Self, RegIntelError> {
        let prefixes: Vec<String> = prefixes
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .map(regex::escape)
            .collect();
        let prefix = if prefixes.is_empty() {
            String::new()
        } else {
            format!(r"(?:(?:{})\s+)?", prefixes.join("|"))
        };
        let source = format!(r"^{prefix}(?:Principle|Principe)\s+\d{{1,2}}\b.*");
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .map_err(|e| {
                RegIntelError::MalformedConfiguration(format!("invalid principle prefix: {e}"))
            })?;
        Ok(Self { regex })
    }

    /// Byte offsets where principle headings start, in document order.
    pub fn section_starts(&self, text: &str) -> Vec<usize> {
        self.regex.find_iter(text).map(|m| m.start()).collect()
    }
}
