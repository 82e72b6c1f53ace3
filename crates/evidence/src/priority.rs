//! Ordered source priority rules. Lower rank is preferred.

use std::fmt;

type SourcePredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

struct PriorityRule {
    rank: u32,
    predicate: SourcePredicate,
}

/// Rank lookup over the lower-cased source name. The first matching rule
/// wins; sources matching no rule get the fallback rank.
pub struct SourcePriority {
    rules: Vec<PriorityRule>,
    fallback: u32,
}

impl fmt::Debug for SourcePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks: Vec<u32> = self.rules.iter().map(|r| r.rank).collect();
        f.debug_struct("SourcePriority")
            .field("rule_ranks", &ranks)
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Default for SourcePriority {
    fn default() -> Self {
        Self::regulatory()
    }
}

impl SourcePriority {
    /// No rules: every source gets `fallback`.
    pub fn uniform(fallback: u32) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    pub fn with_rule<F>(mut self, rank: u32, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rules.push(PriorityRule {
            rank,
            predicate: Box::new(predicate),
        });
        self
    }

    /// Primary framework text first, then implementation guides, then
    /// supervisory reports about the framework.
    pub fn regulatory() -> Self {
        Self::uniform(5)
            .with_rule(0, |s| s.contains("bcbs239") && !s.contains("report"))
            .with_rule(1, |s| s.contains("rdarr"))
            .with_rule(2, |s| s.contains("bcbs_239_report") || s.contains("bcbs_239"))
    }

    pub fn rank(&self, source: &str) -> u32 {
        let source = source.to_lowercase();
        self.rules
            .iter()
            .find(|r| (r.predicate)(&source))
            .map_or(self.fallback, |r| r.rank)
    }
}
