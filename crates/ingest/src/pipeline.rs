//! Batch ingestion: route every document to a chunking strategy and collect
//! the records to hand to the vector store.

use std::collections::HashSet;

use rayon::prelude::*;
use regintel_core::{Chunk, Document, IndexRecord};
use tracing::{info, warn};

use crate::document::chunker::{ChunkStrategy, Chunker, StrategyRouter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Extraction produced no visible text.
    EmptyText,
    /// Another document in the same batch already uses this source name.
    DuplicateSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub source: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub source: String,
    pub strategy: ChunkStrategy,
    pub chunk_count: usize,
}

/// Outcome of one ingestion batch, in input order.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub chunks: Vec<Chunk>,
    pub sources: Vec<SourceSummary>,
    pub skipped: Vec<SkippedDocument>,
}

impl IngestReport {
    /// Records keyed `{source}-{chunk_index}`, ready for indexing.
    pub fn records(&self) -> Vec<IndexRecord> {
        self.chunks.iter().map(Chunk::to_record).collect()
    }

    pub fn total_chunks(&self) -> usize {
        self.chunks.len()
    }
}

/// Chunk a batch of documents.
///
/// Distinct sources are chunked in parallel. A source name may appear only
/// once per batch so its chunk indices stay unique; later duplicates are
/// skipped.
pub fn ingest(documents: &[Document], chunker: &Chunker, router: &StrategyRouter) -> IngestReport {
    let mut report = IngestReport::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut accepted: Vec<&Document> = Vec::with_capacity(documents.len());

    for doc in documents {
        if doc.raw_text.trim().is_empty() {
            warn!(source = %doc.filename, "empty text after extraction, skipped");
            report.skipped.push(SkippedDocument {
                source: doc.filename.clone(),
                reason: SkipReason::EmptyText,
            });
            continue;
        }
        if !seen.insert(doc.filename.as_str()) {
            warn!(source = %doc.filename, "duplicate source in batch, skipped");
            report.skipped.push(SkippedDocument {
                source: doc.filename.clone(),
                reason: SkipReason::DuplicateSource,
            });
            continue;
        }
        accepted.push(doc);
    }

    let results: Vec<(String, ChunkStrategy, Vec<Chunk>)> = accepted
        .par_iter()
        .map(|doc| {
            let strategy = router.route(&doc.filename);
            let chunks = chunker.chunk(doc, strategy);
            (doc.filename.clone(), strategy, chunks)
        })
        .collect();

    for (source, strategy, chunks) in results {
        info!(source = %source, %strategy, chunks = chunks.len(), "document chunked");
        report.sources.push(SourceSummary {
            source,
            strategy,
            chunk_count: chunks.len(),
        });
        report.chunks.extend(chunks);
    }

    info!(
        documents = report.sources.len(),
        skipped = report.skipped.len(),
        chunks = report.total_chunks(),
        "ingestion batch complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use regintel_core::config::ChunkingConfig;

    fn chunker() -> Chunker {
        Chunker::from_config(&ChunkingConfig::default()).unwrap()
    }

    #[test]
    fn routes_each_document_and_keeps_input_order() {
        let docs = vec![
            Document::new("bcbs239.pdf", "Principle 1 Governance\nbody\nPrinciple 2 Architecture\nbody"),
            Document::new("notes.txt", "free text"),
            Document::new("data policy.md", "Scope\nall entities"),
        ];
        let report = ingest(&docs, &chunker(), &StrategyRouter::default());

        let strategies: Vec<ChunkStrategy> = report.sources.iter().map(|s| s.strategy).collect();
        assert_eq!(
            strategies,
            vec![ChunkStrategy::Principles, ChunkStrategy::Window, ChunkStrategy::Headings]
        );
        assert_eq!(report.sources[0].chunk_count, 2);
        assert_eq!(report.total_chunks(), 4);
        assert_eq!(report.chunks[0].source, "bcbs239.pdf");
        assert_eq!(report.chunks[3].source, "data policy.md");
    }

    #[test]
    fn records_use_source_dash_index_ids() {
        let docs = vec![Document::new("bcbs239.pdf", "Principle 1 A\nx\nPrinciple 2 B\ny")];
        let report = ingest(&docs, &chunker(), &StrategyRouter::default());
        let ids: Vec<String> = report.records().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["bcbs239.pdf-0", "bcbs239.pdf-1"]);
    }

    #[test]
    fn skips_blank_and_duplicate_sources() {
        let docs = vec![
            Document::new("a.txt", "first"),
            Document::new("blank.txt", "  \n\t"),
            Document::new("a.txt", "second copy"),
        ];
        let report = ingest(&docs, &chunker(), &StrategyRouter::default());
        assert_eq!(report.total_chunks(), 1);
        assert_eq!(report.chunks[0].text, "first");
        assert_eq!(
            report.skipped,
            vec![
                SkippedDocument { source: "blank.txt".into(), reason: SkipReason::EmptyText },
                SkippedDocument { source: "a.txt".into(), reason: SkipReason::DuplicateSource },
            ]
        );
    }
}
