//! Query-time evidence handling.
//!
//! This crate provides:
//! - Query classification (enumeration / generic / smalltalk)
//! - Source priority rules and the capped, ranked evidence selector
//! - Citation and evidence-block rendering for the generator prompt
//! - Collaborator traits (vector store, generator) and the RAG-first answer flow

pub mod answer;
pub mod citation;
pub mod classify;
pub mod priority;
pub mod prompt;
pub mod selector;
pub mod traits;

pub use answer::{Answer, AnswerMode, Assistant};
pub use citation::{format_citations, format_citations_with, make_snippet, CitationEntry, DEFAULT_SNIPPET_CHARS};
pub use classify::{Framework, KeywordClassifier, QueryClass, QueryClassifier};
pub use priority::SourcePriority;
pub use prompt::{compose_grounded_prompt, evidence_block, evidence_entries, AnswerStyle};
pub use selector::{EvidenceSelector, Selection, SelectionPath, SelectorConfig};
pub use traits::{CollaboratorError, Corpus, GenerationRequest, Generator, VectorStore};
