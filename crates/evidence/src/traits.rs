use regintel_core::Candidate;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by an external collaborator. Carried through untouched;
/// nothing in this crate inspects or retries it.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("vector store failed: {0}")]
    Store(#[source] BoxError),

    #[error("generation failed: {0}")]
    Generation(#[source] BoxError),
}

impl CollaboratorError {
    pub fn store(err: impl Into<BoxError>) -> Self {
        CollaboratorError::Store(err.into())
    }

    pub fn generation(err: impl Into<BoxError>) -> Self {
        CollaboratorError::Generation(err.into())
    }
}

/// Read access to every indexed chunk, in store order.
pub trait Corpus: Send + Sync {
    fn all_chunks(&self) -> Result<Vec<Candidate>, CollaboratorError>;
}

/// Similarity search backend (embedding + vector index).
pub trait VectorStore: Corpus {
    /// Number of indexed chunks.
    fn count(&self) -> Result<usize, CollaboratorError>;

    /// Up to `n_results` candidates ordered by ascending distance.
    fn query(&self, text: &str, n_results: usize) -> Result<Vec<Candidate>, CollaboratorError>;
}

/// Inputs for one completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Natural-language answer generation backend.
pub trait Generator: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<String, CollaboratorError>;
}

/// A fixed set of chunks, e.g. loaded from an exported index.
impl Corpus for Vec<Candidate> {
    fn all_chunks(&self) -> Result<Vec<Candidate>, CollaboratorError> {
        Ok(self.clone())
    }
}
