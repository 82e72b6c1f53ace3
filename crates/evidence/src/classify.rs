//! Query classification behind a swappable trait.

use serde::{Deserialize, Serialize};

/// A structured framework whose numbered items can be enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Framework {
    pub name: String,
    /// Lower-case substrings that identify the framework in a query.
    pub query_keywords: Vec<String>,
    /// Lower-case substrings that identify the framework's source files.
    pub source_markers: Vec<String>,
}

impl Framework {
    pub fn bcbs239() -> Self {
        Self {
            name: "BCBS 239".to_string(),
            query_keywords: vec![
                "bcbs 239".to_string(),
                "bcbs239".to_string(),
                "risk data aggregation".to_string(),
            ],
            source_markers: vec!["bcbs239".to_string()],
        }
    }

    pub fn matches_source(&self, source: &str) -> bool {
        let source = source.to_lowercase();
        self.source_markers.iter().any(|m| source.contains(m.as_str()))
    }

    fn mentioned_in(&self, query_lower: &str) -> bool {
        self.query_keywords.iter().any(|k| query_lower.contains(k.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryClass {
    /// Complete, ordered listing of a framework's items.
    Enumeration(Framework),
    Generic,
    Smalltalk,
}

pub trait QueryClassifier: Send + Sync {
    fn classify(&self, query: &str) -> QueryClass;
}

/// Lower-cased substring matching against keyword lists.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    frameworks: Vec<Framework>,
    enumeration_keywords: Vec<String>,
    smalltalk_triggers: Vec<String>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(
            vec![Framework::bcbs239()],
            &["principle", "principe", "principes"],
            &["ça va", "tu vas bien", "how are you", "who are you"],
        )
    }
}

impl KeywordClassifier {
    pub fn new(frameworks: Vec<Framework>, enumeration_keywords: &[&str], smalltalk_triggers: &[&str]) -> Self {
        Self {
            frameworks,
            enumeration_keywords: enumeration_keywords.iter().map(|k| k.to_lowercase()).collect(),
            smalltalk_triggers: smalltalk_triggers.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

impl QueryClassifier for KeywordClassifier {
    fn classify(&self, query: &str) -> QueryClass {
        let q = query.to_lowercase();

        let wants_enumeration = self.enumeration_keywords.iter().any(|k| q.contains(k.as_str()));
        if wants_enumeration {
            if let Some(framework) = self.frameworks.iter().find(|f| f.mentioned_in(&q)) {
                return QueryClass::Enumeration(framework.clone());
            }
        }
        if self.smalltalk_triggers.iter().any(|t| q.contains(t.as_str())) {
            return QueryClass::Smalltalk;
        }
        QueryClass::Generic
    }
}
