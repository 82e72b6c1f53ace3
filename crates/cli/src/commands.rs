use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use regintel_core::{Candidate, Config, Document, IndexRecord};
use regintel_evidence::{
    evidence_block, format_citations_with, CitationEntry, Corpus, EvidenceSelector, Selection,
    SelectorConfig,
};
use regintel_ingest::{extract_text, ingest, load_folder, Chunker, StrategyRouter};

use crate::cli::{OutputFormat, StrategyArg};

pub fn router_for(strategy: StrategyArg) -> StrategyRouter {
    match strategy.fixed() {
        Some(fixed) => StrategyRouter::fixed(fixed),
        None => StrategyRouter::default(),
    }
}

fn load_documents(path: &Path) -> Result<Vec<Document>> {
    if path.is_dir() {
        return load_folder(path).with_context(|| format!("failed to read folder {}", path.display()));
    }
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let extracted = extract_text(&bytes, &filename)
        .with_context(|| format!("failed to extract text from {filename}"))?;
    Ok(vec![extracted.into_document()])
}

/// Chunk `path` and write one JSON index record per line.
pub fn chunk(config: &Config, path: &Path, strategy: StrategyArg, out: &mut impl Write) -> Result<()> {
    let router = router_for(strategy);
    let chunker = Chunker::from_config(&config.chunking)?;
    let documents = load_documents(path)?;
    if documents.is_empty() {
        warn!(path = %path.display(), "no supported documents found");
    }

    let report = ingest(&documents, &chunker, &router);
    for skipped in &report.skipped {
        warn!(source = %skipped.source, reason = ?skipped.reason, "document skipped");
    }
    for record in report.records() {
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
    }
    info!(
        documents = report.sources.len(),
        chunks = report.total_chunks(),
        "chunking complete"
    );
    Ok(())
}

fn read_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a JSON array of candidates", path.display()))
}

fn read_corpus(path: &Path) -> Result<Vec<Candidate>> {
    let file = fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut corpus = Vec::new();
    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: IndexRecord = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid index record", path.display(), n + 1))?;
        corpus.push(Candidate::from(record));
    }
    Ok(corpus)
}

pub fn select(
    config: &Config,
    query: &str,
    candidates: &Path,
    corpus: Option<&Path>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    if query.trim().is_empty() {
        bail!("query must not be empty");
    }
    let candidates = read_candidates(candidates)?;
    let corpus = corpus.map(read_corpus).transpose()?;

    let selector = EvidenceSelector::regulatory(SelectorConfig::from(&config.retrieval));
    let selection = selector.select(query, candidates, corpus.as_ref().map(|c| c as &dyn Corpus));
    info!(path = ?selection.path, items = selection.items.len(), "evidence selected");

    writeln!(out, "{}", render(&selection, format, config.retrieval.snippet_chars)?)?;
    Ok(())
}

fn render(selection: &Selection, format: OutputFormat, snippet_chars: usize) -> Result<String> {
    Ok(match format {
        OutputFormat::Citations => {
            let entries: Vec<CitationEntry> = selection.items.iter().cloned().map(CitationEntry::from).collect();
            format_citations_with(&entries, snippet_chars)
        }
        OutputFormat::Evidence => evidence_block(&selection.items),
        OutputFormat::Json => serde_json::to_string_pretty(selection)?,
    })
}

pub fn show_config(config: &Config, out: &mut impl Write) -> Result<()> {
    let mut summary = config.summary();
    summary["available_profiles"] = serde_json::json!(Config::available_profiles());
    writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    Ok(())
}
