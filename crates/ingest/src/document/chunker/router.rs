//! Filename-based choice of chunking strategy.

use super::types::ChunkStrategy;

const PRINCIPLE_MARKERS: &[&str] = &[
    "bcbs239",
    "bcbs_239",
    "principles for effective risk data aggregation",
    "ssm.bcbs_239_report",
    "thematic review",
];

const HEADING_MARKERS: &[&str] = &[
    "rdarr", "bcbs", "guide", "report", "ai act", "gdpr", "eba", "ecb", "policy", "procedure",
    "procédure", "charter", "charte",
];

/// Picks a strategy from markers found in the lower-cased file name.
///
/// Principle markers win over heading markers; anything else is windowed.
#[derive(Debug, Clone)]
pub struct StrategyRouter {
    principle_markers: Vec<String>,
    heading_markers: Vec<String>,
    fixed: Option<ChunkStrategy>,
}

impl Default for StrategyRouter {
    fn default() -> Self {
        Self::new(PRINCIPLE_MARKERS, HEADING_MARKERS)
    }
}

impl StrategyRouter {
    pub fn new<S: AsRef<str>>(principle_markers: &[S], heading_markers: &[S]) -> Self {
        let lower = |markers: &[S]| {
            markers
                .iter()
                .map(|m| m.as_ref().to_lowercase())
                .collect::<Vec<_>>()
        };
        Self {
            principle_markers: lower(principle_markers),
            heading_markers: lower(heading_markers),
            fixed: None,
        }
    }

    /// A router that ignores file names and always answers `strategy`.
    pub fn fixed(strategy: ChunkStrategy) -> Self {
        Self {
            fixed: Some(strategy),
            ..Self::default()
        }
    }

    pub fn route(&self, filename: &str) -> ChunkStrategy {
        if let Some(strategy) = self.fixed {
            return strategy;
        }
        let name = filename.to_lowercase();
        if self.principle_markers.iter().any(|m| name.contains(m.as_str())) {
            ChunkStrategy::Principles
        } else if self.heading_markers.iter().any(|m| name.contains(m.as_str())) {
            ChunkStrategy::Headings
        } else {
            ChunkStrategy::Window
        }
    }
}
