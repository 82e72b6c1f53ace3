pub mod chunker;
mod md;
mod pdf;
mod txt;

use std::path::Path;

use regintel_core::Document;
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions accepted by [`extract_text`] and [`load_folder`].
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt", "text", "md", "markdown", "csv"];

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A page of extracted text.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number (for PDFs). For text formats, always 1.
    pub page_number: usize,
    pub text: String,
}

/// Result of extracting text from a document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename.
    pub filename: String,
    /// File type: "pdf", "txt", "md", "csv"
    pub file_type: String,
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    /// Get all text concatenated.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_document(self) -> Document {
        let raw_text = self.full_text();
        Document::new(self.filename, raw_text)
    }
}

fn extension_of(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Extract text from file bytes based on file type.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let ext = extension_of(filename);
    let file_type = ext.as_str();

    let pages = match file_type {
        "pdf" => pdf::extract_pdf(bytes)?,
        "txt" | "text" | "csv" => txt::extract_txt(bytes)?,
        "md" | "markdown" => md::extract_md(bytes)?,
        other => return Err(ExtractionError::UnsupportedType(other.to_string())),
    };

    Ok(ExtractedDocument {
        filename: filename.to_string(),
        file_type: file_type.to_string(),
        pages,
    })
}

/// Walk `dir` recursively and extract every supported file.
///
/// Documents are keyed by bare file name. Files that fail to read or extract
/// are logged and skipped.
pub fn load_folder(dir: &Path) -> Result<Vec<Document>, ExtractionError> {
    if !dir.is_dir() {
        return Err(ExtractionError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("not a directory: {}", dir.display()),
        )));
    }

    let mut docs = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let filename = entry.file_name().to_string_lossy().into_owned();
        if !SUPPORTED_EXTENSIONS.contains(&extension_of(&filename).as_str()) {
            continue;
        }

        let bytes = match std::fs::read(entry.path()) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(file = %filename, error = %e, "failed to read document");
                continue;
            }
        };
        match extract_text(&bytes, &filename) {
            Ok(extracted) => docs.push(extracted.into_document()),
            Err(e) => tracing::warn!(file = %filename, error = %e, "extraction failed"),
        }
    }

    tracing::debug!(dir = %dir.display(), documents = docs.len(), "folder loaded");
    Ok(docs)
}
