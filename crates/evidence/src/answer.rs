//! RAG-first answering with an ungrounded fallback.

use std::sync::Arc;

use regintel_core::config::{GenerationConfig, RetrievalConfig};
use regintel_core::{Candidate, Config, EvidenceItem};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classify::QueryClass;
use crate::prompt::{
    compose_grounded_prompt, evidence_block, evidence_entries, ungrounded_system_prompt, AnswerStyle,
    GROUNDED_SYSTEM_PROMPT, SMALLTALK_REPLY,
};
use crate::selector::{EvidenceSelector, SelectorConfig};
use crate::traits::{CollaboratorError, Corpus, GenerationRequest, Generator, VectorStore};

/// Exposes a vector store's full listing to the selector.
struct StoreCorpus<'a>(&'a dyn VectorStore);

impl Corpus for StoreCorpus<'_> {
    fn all_chunks(&self) -> Result<Vec<Candidate>, CollaboratorError> {
        self.0.all_chunks()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerMode {
    /// Grounded in selected evidence.
    Rag,
    /// General knowledge only.
    Llm,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub text: String,
    /// Numbered evidence entries as shown to the generator; empty for ungrounded answers.
    pub sources: Vec<String>,
    pub evidence: Vec<EvidenceItem>,
    pub mode: AnswerMode,
}

pub struct Assistant {
    store: Arc<dyn VectorStore>,
    generator: Arc<dyn Generator>,
    selector: EvidenceSelector,
    retrieval: RetrievalConfig,
    generation: GenerationConfig,
}

impl Assistant {
    pub fn new(
        store: Arc<dyn VectorStore>,
        generator: Arc<dyn Generator>,
        selector: EvidenceSelector,
        config: &Config,
    ) -> Self {
        Self {
            store,
            generator,
            selector,
            retrieval: config.retrieval.clone(),
            generation: config.generation.clone(),
        }
    }

    /// Regulatory selector built from `config.retrieval`.
    pub fn from_config(store: Arc<dyn VectorStore>, generator: Arc<dyn Generator>, config: &Config) -> Self {
        let selector = EvidenceSelector::regulatory(SelectorConfig::from(&config.retrieval));
        Self::new(store, generator, selector, config)
    }

    /// Answer from evidence when the store has any and `prefer_rag` is set;
    /// otherwise, or when no evidence survives selection, answer ungrounded.
    pub fn answer(&self, question: &str, prefer_rag: bool, style: AnswerStyle) -> Result<Answer, CollaboratorError> {
        let has_vectors = match self.store.count() {
            Ok(n) => n > 0,
            Err(e) => {
                warn!(error = %e, "vector count unavailable, treating store as empty");
                false
            }
        };

        if has_vectors && prefer_rag {
            if let Some(answer) = self.grounded(question, style)? {
                return Ok(answer);
            }
            debug!("no usable evidence, answering without grounding");
        }
        self.ungrounded(question, style)
    }

    fn grounded(&self, question: &str, style: AnswerStyle) -> Result<Option<Answer>, CollaboratorError> {
        let width = self.retrieval.fetch_width();
        let candidates = self.store.query(question, width)?;
        if candidates.is_empty() {
            return Ok(None);
        }

        let corpus = StoreCorpus(self.store.as_ref());
        let selection = self.selector.select(question, candidates, Some(&corpus));
        if selection.is_insufficient() {
            return Ok(None);
        }

        let block = evidence_block(&selection.items);
        let request = GenerationRequest {
            model: self.generation.model.clone(),
            system: GROUNDED_SYSTEM_PROMPT.to_string(),
            prompt: compose_grounded_prompt(question, style, &block),
            temperature: self.generation.rag_temperature,
        };
        let text = self.generator.generate(&request)?;
        info!(
            path = ?selection.path,
            evidence = selection.items.len(),
            %style,
            "grounded answer generated"
        );

        Ok(Some(Answer {
            text,
            sources: evidence_entries(&selection.items),
            evidence: selection.items,
            mode: AnswerMode::Rag,
        }))
    }

    fn ungrounded(&self, question: &str, style: AnswerStyle) -> Result<Answer, CollaboratorError> {
        let text = if self.selector.classify(question) == QueryClass::Smalltalk {
            SMALLTALK_REPLY.to_string()
        } else {
            let request = GenerationRequest {
                model: self.generation.model.clone(),
                system: ungrounded_system_prompt(style),
                prompt: question.to_string(),
                temperature: self.generation.llm_temperature,
            };
            self.generator.generate(&request)?
        };
        info!(%style, "ungrounded answer generated");
        Ok(Answer {
            text,
            sources: Vec::new(),
            evidence: Vec::new(),
            mode: AnswerMode::Llm,
        })
    }
}
