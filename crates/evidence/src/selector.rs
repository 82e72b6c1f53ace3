//! Evidence selection over retrieved candidates.
//!
//! Two paths:
//! - **Enumeration**: every chunk of one framework, in document order.
//! - **Generic**: candidates ranked by source priority then distance, with
//!   a per-source cap for diversity and a global cap on the total.

use std::collections::HashMap;

use regintel_core::config::RetrievalConfig;
use regintel_core::{Candidate, EvidenceItem};
use serde::Serialize;
use tracing::{debug, warn};

use crate::citation::make_snippet;
use crate::classify::{Framework, KeywordClassifier, QueryClass, QueryClassifier};
use crate::priority::SourcePriority;
use crate::traits::Corpus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    pub per_source_cap: usize,
    /// Upper bound on generic-path evidence.
    pub max_evidence: usize,
    pub enumeration_cap: usize,
    pub snippet_chars: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self::from(&RetrievalConfig::default())
    }
}

impl From<&RetrievalConfig> for SelectorConfig {
    fn from(cfg: &RetrievalConfig) -> Self {
        Self {
            per_source_cap: cfg.per_source_cap,
            max_evidence: cfg.max_evidence(),
            enumeration_cap: cfg.enumeration_cap,
            snippet_chars: cfg.snippet_chars,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPath {
    Enumeration,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub path: SelectionPath,
    pub items: Vec<EvidenceItem>,
}

impl Selection {
    /// No usable evidence: callers should answer without grounding.
    pub fn is_insufficient(&self) -> bool {
        self.items.is_empty()
    }
}

pub struct EvidenceSelector {
    config: SelectorConfig,
    classifier: Box<dyn QueryClassifier>,
    priority: SourcePriority,
}

impl std::fmt::Debug for EvidenceSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvidenceSelector")
            .field("config", &self.config)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

impl EvidenceSelector {
    pub fn new(config: SelectorConfig, classifier: Box<dyn QueryClassifier>, priority: SourcePriority) -> Self {
        Self {
            config,
            classifier,
            priority,
        }
    }

    /// Keyword classifier and regulatory source priorities.
    pub fn regulatory(config: SelectorConfig) -> Self {
        Self::new(config, Box::new(KeywordClassifier::default()), SourcePriority::regulatory())
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn classify(&self, query: &str) -> QueryClass {
        self.classifier.classify(query)
    }

    /// Classify `query` and select evidence from `candidates`. The corpus, when
    /// given, is only read on the enumeration path.
    pub fn select(&self, query: &str, candidates: Vec<Candidate>, corpus: Option<&dyn Corpus>) -> Selection {
        let class = self.classify(query);
        self.select_with_class(&class, candidates, corpus)
    }

    pub fn select_with_class(
        &self,
        class: &QueryClass,
        candidates: Vec<Candidate>,
        corpus: Option<&dyn Corpus>,
    ) -> Selection {
        if let QueryClass::Enumeration(framework) = class {
            let listed = self.enumerate(framework, &candidates, corpus);
            if !listed.is_empty() {
                debug!(framework = %framework.name, items = listed.len(), "enumeration evidence selected");
                return Selection {
                    path: SelectionPath::Enumeration,
                    items: self.to_items(&listed),
                };
            }
            debug!(framework = %framework.name, "no framework chunks found, using generic ranking");
        }

        let selected = self.rank_generic(candidates);
        debug!(items = selected.len(), "generic evidence selected");
        Selection {
            path: SelectionPath::Generic,
            items: self.to_items(&selected),
        }
    }

    /// Framework chunks from the corpus, or from the candidates when the
    /// corpus is absent, fails, or has none. Sorted by chunk index and capped.
    fn enumerate(&self, framework: &Framework, candidates: &[Candidate], corpus: Option<&dyn Corpus>) -> Vec<Candidate> {
        let from_corpus = match corpus.map(|c| c.all_chunks()) {
            Some(Ok(all)) => all
                .into_iter()
                .filter(|c| framework.matches_source(c.source()))
                .collect(),
            Some(Err(e)) => {
                warn!(error = %e, "corpus read failed, enumerating retrieved candidates");
                Vec::new()
            }
            None => Vec::new(),
        };

        let mut listed: Vec<Candidate> = if from_corpus.is_empty() {
            candidates
                .iter()
                .filter(|c| framework.matches_source(c.source()))
                .cloned()
                .collect()
        } else {
            from_corpus
        };
        listed.sort_by_key(|c| c.chunk_index());
        listed.truncate(self.config.enumeration_cap);
        listed
    }

    fn rank_generic(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        let limit = candidates.len().min(self.config.max_evidence);
        if limit == 0 {
            return Vec::new();
        }

        candidates.sort_by(|a, b| {
            self.priority
                .rank(a.source())
                .cmp(&self.priority.rank(b.source()))
                .then(a.distance.total_cmp(&b.distance))
        });

        let mut per_source: HashMap<String, usize> = HashMap::new();
        let mut selected = Vec::with_capacity(limit);
        for candidate in candidates {
            let taken = per_source.entry(candidate.source().to_string()).or_insert(0);
            if *taken >= self.config.per_source_cap {
                continue;
            }
            *taken += 1;
            selected.push(candidate);
            if selected.len() >= limit {
                break;
            }
        }
        selected
    }

    fn to_items(&self, selected: &[Candidate]) -> Vec<EvidenceItem> {
        selected
            .iter()
            .enumerate()
            .map(|(i, c)| EvidenceItem {
                rank: i + 1,
                source: c.source().to_string(),
                chunk_index: c.chunk_index(),
                snippet: make_snippet(&c.text, self.config.snippet_chars),
            })
            .collect()
    }
}
