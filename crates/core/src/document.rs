use serde::{Deserialize, Serialize};

/// Source name of a document. File names are the unique key of the corpus.
pub type SourceName = String;

/// A decoded document handed to the chunkers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub filename: SourceName,
    pub raw_text: String,
}

impl Document {
    pub fn new(filename: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// A bounded slice of a document, the retrieval unit.
///
/// `chunk_index` is 0-based and gap-free within one chunking pass of a source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub source: SourceName,
    pub chunk_index: usize,
}

impl Chunk {
    /// Identifier used by the vector store: `{source}-{chunk_index}`.
    pub fn unique_id(&self) -> String {
        format!("{}-{}", self.source, self.chunk_index)
    }

    pub fn metadata(&self) -> ChunkMetadata {
        ChunkMetadata {
            source: self.source.clone(),
            chunk_index: self.chunk_index,
        }
    }

    pub fn to_record(&self) -> IndexRecord {
        IndexRecord {
            id: self.unique_id(),
            text: self.text.clone(),
            metadata: self.metadata(),
        }
    }
}

/// Positional metadata stored next to every indexed chunk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChunkMetadata {
    pub source: SourceName,
    #[serde(alias = "chunk")]
    pub chunk_index: usize,
}

/// The `(text, metadata, unique_id)` tuple accepted by the vector store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexRecord {
    pub id: String,
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// A chunk returned by similarity search. Lower distance = more relevant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub text: String,
    pub metadata: ChunkMetadata,
    #[serde(default)]
    pub distance: f32,
}

impl Candidate {
    pub fn new(text: impl Into<String>, source: impl Into<String>, chunk_index: usize, distance: f32) -> Self {
        Self {
            text: text.into(),
            metadata: ChunkMetadata {
                source: source.into(),
                chunk_index,
            },
            distance,
        }
    }

    pub fn source(&self) -> &str {
        &self.metadata.source
    }

    pub fn chunk_index(&self) -> usize {
        self.metadata.chunk_index
    }
}

impl From<IndexRecord> for Candidate {
    fn from(rec: IndexRecord) -> Self {
        Self {
            text: rec.text,
            metadata: rec.metadata,
            distance: 0.0,
        }
    }
}

/// One selected piece of evidence, ranked from 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvidenceItem {
    pub rank: usize,
    pub source: SourceName,
    pub chunk_index: usize,
    pub snippet: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_id_joins_source_and_index() {
        let chunk = Chunk {
            text: "x".into(),
            source: "bcbs239.pdf".into(),
            chunk_index: 7,
        };
        assert_eq!(chunk.unique_id(), "bcbs239.pdf-7");
        assert_eq!(chunk.to_record().metadata.chunk_index, 7);
    }

    #[test]
    fn metadata_accepts_legacy_chunk_key() {
        let meta: ChunkMetadata =
            serde_json::from_str(r#"{"source":"a.pdf","chunk":3}"#).unwrap();
        assert_eq!(meta.chunk_index, 3);
    }

    #[test]
    fn candidate_distance_defaults_to_zero() {
        let c: Candidate = serde_json::from_str(
            r#"{"text":"t","metadata":{"source":"a","chunk_index":1}}"#,
        )
        .unwrap();
        assert_eq!(c.distance, 0.0);
        assert_eq!(c.source(), "a");
    }
}
