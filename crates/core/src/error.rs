use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegIntelError {
    /// Invalid settings or patterns, detected before any document is processed.
    #[error("Malformed configuration: {0}")]
    MalformedConfiguration(String),
}
