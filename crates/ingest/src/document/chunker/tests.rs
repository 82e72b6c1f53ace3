//! Tests for the chunking engine.

use super::headings::{HeadingMatcher, PrincipleMatcher};
use super::helpers::{effective_overlap, merge_blocks, normalize_text, split_windows};
use super::router::StrategyRouter;
use super::strategies::{chunk_by_headings, chunk_by_principles, chunk_by_size, Chunker};
use super::types::{Block, ChunkConfig, ChunkStrategy};
use regintel_core::config::ChunkingConfig;
use regintel_core::{Chunk, Document};

fn config(max_chars: usize, overlap: usize, min_section_chars: usize) -> ChunkConfig {
    ChunkConfig {
        max_chars,
        overlap,
        min_section_chars,
        principle_max_chars: 2200,
        principle_overlap: 200,
    }
}

fn headings() -> HeadingMatcher {
    HeadingMatcher::regulatory().unwrap()
}

fn principles() -> PrincipleMatcher {
    PrincipleMatcher::new(&["BCBS"]).unwrap()
}

fn alphabet_text(len: usize) -> String {
    (0..len).map(|i| (b'a' + (i % 26) as u8) as char).collect()
}

fn assert_contiguous(chunks: &[Chunk]) {
    for (i, c) in chunks.iter().enumerate() {
        assert_eq!(c.chunk_index, i, "chunk indices must be 0..N-1");
    }
}

// ── Normalizer ──────────────────────────────────────────────────────

#[test]
fn normalize_unifies_line_endings_and_blank_runs() {
    assert_eq!(normalize_text("a  \r\nb\r\n\r\n\r\n\r\nc"), "a\nb\n\nc");
    assert_eq!(normalize_text("x\ry"), "x\ny");
}

#[test]
fn normalize_keeps_single_blank_line_and_final_spaces() {
    assert_eq!(normalize_text("a\n\nb  "), "a\n\nb  ");
    assert_eq!(normalize_text("a\t \n \nb"), "a\n\nb");
    assert_eq!(normalize_text(""), "");
}

// ── Size-bounded windows ────────────────────────────────────────────

#[test]
fn windows_respect_max_and_overlap_exactly() {
    let text = alphabet_text(1000);
    let chunks = chunk_by_size(&text, "doc.txt", 100, 20);
    assert_contiguous(&chunks);
    for c in &chunks {
        assert!(c.text.chars().count() <= 100);
    }
    for pair in chunks.windows(2) {
        let prev: Vec<char> = pair[0].text.chars().collect();
        let next: Vec<char> = pair[1].text.chars().collect();
        assert_eq!(&prev[prev.len() - 20..], &next[..20], "adjacent windows share 20 chars");
    }
}

#[test]
fn overlapping_windows_reconstruct_the_text() {
    let text = format!("{}\n\n{}", alphabet_text(733), alphabet_text(411));
    let chunks = chunk_by_size(&text, "doc.txt", 150, 30);
    let mut rebuilt = chunks[0].text.clone();
    for c in &chunks[1..] {
        rebuilt.extend(c.text.chars().skip(30));
    }
    assert_eq!(rebuilt, normalize_text(&text));
}

#[test]
fn overlap_not_smaller_than_max_still_terminates() {
    let text = alphabet_text(1000);
    for overlap in [100, 150, 10_000] {
        let chunks = chunk_by_size(&text, "doc.txt", 100, overlap);
        assert_eq!(chunks.len(), 10);
        let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(joined, text);
    }
    assert_eq!(effective_overlap(100, 100), 0);
    assert_eq!(effective_overlap(100, 99), 99);
}

#[test]
fn zero_overlap_partitions_text() {
    let text = alphabet_text(250);
    let chunks = chunk_by_size(&text, "doc.txt", 100, 0);
    let lens: Vec<usize> = chunks.iter().map(|c| c.text.len()).collect();
    assert_eq!(lens, vec![100, 100, 50]);
}

#[test]
fn windows_count_characters_not_bytes() {
    let text = "é".repeat(250);
    let pieces = split_windows(&text, 100, 0);
    assert_eq!(pieces.len(), 3);
    assert!(pieces.iter().all(|p| p.chars().count() <= 100));
}

#[test]
fn empty_text_produces_no_chunks() {
    assert!(chunk_by_size("", "doc.txt", 100, 10).is_empty());
    assert!(chunk_by_headings("", "doc.txt", &headings(), &config(100, 10, 600)).is_empty());
    assert!(
        chunk_by_principles("", "doc.txt", &principles(), &headings(), &config(100, 10, 600))
            .is_empty()
    );
}

#[test]
fn short_text_is_one_chunk() {
    let chunks = chunk_by_size("Just one paragraph.", "a.txt", 1800, 200);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].source, "a.txt");
    assert_eq!(chunks[0].chunk_index, 0);
}

// ── Block merging ───────────────────────────────────────────────────

#[test]
fn merge_folds_small_blocks_and_keeps_trailing_buffer() {
    let blocks = vec![
        Block::new(Some("Scope".into()), "a".repeat(100)),
        Block::new(Some("Definitions".into()), "b".repeat(100)),
        Block::new(Some("Annex".into()), "tail"),
    ];
    let merged = merge_blocks(blocks, 150);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].title.as_deref(), Some("Scope"));
    assert!(merged[0].body.contains(&format!("Definitions\n{}", "b".repeat(100))));
    assert_eq!(merged[1], Block::new(Some("Annex".into()), "tail"));
}

#[test]
fn merge_keeps_preamble_ahead_of_following_heading() {
    let blocks = vec![
        Block::new(None, "Preamble text"),
        Block::new(Some("Article 1".into()), "First article"),
    ];
    let merged = merge_blocks(blocks, 600);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].title, None);
    assert_eq!(merged[0].render(), "Preamble text\n\nArticle 1\nFirst article");
}

#[test]
fn merge_replaces_blank_untitled_buffer() {
    let blocks = vec![
        Block::new(None, ""),
        Block::new(Some("Scope".into()), "Applies to all banks."),
    ];
    let merged = merge_blocks(blocks, 600);
    assert_eq!(merged, vec![Block::new(Some("Scope".into()), "Applies to all banks.")]);
}

#[test]
fn leading_blank_line_does_not_duplicate_heading() {
    let text = "\nScope\nThis regulation applies to all banks.";
    let chunks = chunk_by_headings(text, "policy.pdf", &headings(), &config(1800, 200, 600));
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "Scope\nThis regulation applies to all banks.");
    assert_eq!(chunks[0].text.matches("Scope").count(), 1, "heading must appear once");
}

#[test]
fn short_preamble_precedes_first_heading() {
    let text = "Cover page\nArticle 1\nFirst article body";
    let chunks = chunk_by_headings(text, "reg.pdf", &headings(), &config(1800, 200, 600));
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "Cover page\n\nArticle 1\nFirst article body");
}

#[test]
fn merge_with_zero_threshold_is_identity() {
    let blocks = vec![Block::new(None, "x"), Block::new(Some("Policy".into()), "y")];
    assert_eq!(merge_blocks(blocks.clone(), 0), blocks);
    assert!(merge_blocks(Vec::new(), 600).is_empty());
}

// ── Heading strategy ────────────────────────────────────────────────

#[test]
fn headings_with_large_bodies_stay_separate() {
    let body = "x".repeat(650);
    let text = format!("Article 1\n{body}\nArticle 2\n{body}\nArticle 3\n{body}");
    let chunks = chunk_by_headings(&text, "reg.pdf", &headings(), &config(5000, 200, 600));
    assert_eq!(chunks.len(), 3);
    for (i, c) in chunks.iter().enumerate() {
        assert!(c.text.starts_with(&format!("Article {}\n", i + 1)));
    }
    assert_contiguous(&chunks);
}

#[test]
fn consecutive_small_sections_merge() {
    let text = format!("Scope\n{}\nDefinitions\n{}", "a".repeat(100), "b".repeat(100));
    let chunks = chunk_by_headings(&text, "policy.docx", &headings(), &config(1800, 200, 600));
    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].text.starts_with("Scope\n"));
    assert!(chunks[0].text.contains("Definitions"));
}

#[test]
fn oversized_section_is_windowed_with_continuous_indices() {
    let text = format!("Article 1\n{}\nArticle 2\n{}", "y".repeat(2500), "z".repeat(700));
    let chunks = chunk_by_headings(&text, "reg.pdf", &headings(), &config(1000, 100, 600));
    assert_eq!(chunks.len(), 4);
    assert!(chunks.iter().all(|c| c.text.chars().count() <= 1000));
    assert_contiguous(&chunks);
    assert!(chunks[3].text.starts_with("Article 2\n"));
}

#[test]
fn blank_sections_fall_back_to_windows() {
    let chunks = chunk_by_headings("\n\n   \n", "blank.txt", &headings(), &config(100, 10, 600));
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].chunk_index, 0);
}

#[test]
fn text_without_headings_is_one_section() {
    let chunks = chunk_by_headings("no structure here", "n.txt", &headings(), &config(100, 10, 600));
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "no structure here");
}

// ── Principle strategy ──────────────────────────────────────────────

#[test]
fn principles_become_one_chunk_each() {
    let text = format!(
        "Principle 1: Governance\n{}\nPrinciple 2: Data architecture\n{}",
        "g".repeat(300),
        "d".repeat(300)
    );
    let chunks = chunk_by_principles(&text, "bcbs239.pdf", &principles(), &headings(), &config(1800, 200, 600));
    assert_eq!(chunks.len(), 2);
    assert!(chunks[0].text.starts_with("Principle 1"));
    assert!(chunks[1].text.starts_with("Principle 2"));
    assert!(!chunks[0].text.contains("Principle 2"));
    assert_contiguous(&chunks);
}

#[test]
fn principle_headings_with_prefix_and_french_label() {
    let text = "BCBS Principle 1 Governance\nbody one\nPrincipe 2 Architecture\nbody two";
    let chunks = chunk_by_principles(text, "bcbs239.pdf", &principles(), &headings(), &config(1800, 200, 600));
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[1].text, "Principe 2 Architecture\nbody two");
}

#[test]
fn without_principles_output_equals_heading_chunker() {
    let text = format!(
        "Scope\n{}\nArticle 4\n{}\nAnnex\n{}",
        "s".repeat(700),
        "t".repeat(2600),
        "u".repeat(50)
    );
    let cfg = config(1000, 100, 600);
    let by_principles = chunk_by_principles(&text, "guide.pdf", &principles(), &headings(), &cfg);
    let by_headings = chunk_by_headings(&text, "guide.pdf", &headings(), &cfg);
    assert_eq!(by_principles, by_headings);
}

#[test]
fn long_principle_is_resplit_and_numbering_continues() {
    let mut cfg = config(1800, 200, 600);
    cfg.principle_max_chars = 500;
    cfg.principle_overlap = 50;
    let text = format!(
        "Principle 1 Governance\n{}\nPrinciple 2 Architecture\nshort body",
        "p".repeat(1200)
    );
    let chunks = chunk_by_principles(&text, "bcbs239.pdf", &principles(), &headings(), &cfg);
    assert!(chunks.len() >= 4);
    assert!(chunks.iter().all(|c| c.text.chars().count() <= 500));
    assert!(chunks[0].text.starts_with("Principle 1"));
    assert_eq!(chunks.last().unwrap().text, "Principle 2 Architecture\nshort body");
    assert_contiguous(&chunks);
}

#[test]
fn text_before_first_principle_is_not_a_section() {
    let text = "Foreword about the framework\nPrinciple 1 Governance\nbody";
    let chunks = chunk_by_principles(text, "bcbs239.pdf", &principles(), &headings(), &config(1800, 200, 600));
    assert_eq!(chunks.len(), 1);
    assert!(!chunks[0].text.contains("Foreword"));
}

// ── Chunker and router ──────────────────────────────────────────────

#[test]
fn chunker_dispatches_by_strategy() {
    let chunker = Chunker::from_config(&ChunkingConfig::default()).unwrap();
    let doc = Document::new("bcbs239.pdf", "Principle 1 Governance\nbody\nPrinciple 2 Risk\nbody");
    assert_eq!(chunker.chunk(&doc, ChunkStrategy::Principles).len(), 2);
    assert_eq!(chunker.chunk(&doc, ChunkStrategy::Window).len(), 1);
    assert_eq!(chunker.chunk(&doc, ChunkStrategy::Headings).len(), 1);
}

#[test]
fn chunker_rejects_zero_sizes() {
    let mut cfg = ChunkingConfig::default();
    cfg.max_chars = 0;
    assert!(Chunker::from_config(&cfg).is_err());
}

#[test]
fn every_strategy_yields_a_chunk_for_non_empty_input() {
    let chunker = Chunker::from_config(&ChunkingConfig::default()).unwrap();
    for text in [" ", "\n", "Annex", "Principle 1", "plain"] {
        let doc = Document::new("x.txt", text);
        for strategy in [ChunkStrategy::Window, ChunkStrategy::Headings, ChunkStrategy::Principles] {
            assert!(!chunker.chunk(&doc, strategy).is_empty(), "{strategy} on {text:?}");
        }
    }
}

#[test]
fn router_picks_strategy_from_filename() {
    let router = StrategyRouter::default();
    assert_eq!(router.route("BCBS239_principles.pdf"), ChunkStrategy::Principles);
    assert_eq!(router.route("SSM.BCBS_239_report.pdf"), ChunkStrategy::Principles);
    assert_eq!(router.route("HexaBank Data Policy.docx"), ChunkStrategy::Headings);
    assert_eq!(router.route("ECB_RDARR_guide.pdf"), ChunkStrategy::Headings);
    assert_eq!(router.route("notes.txt"), ChunkStrategy::Window);
    assert_eq!(StrategyRouter::fixed(ChunkStrategy::Headings).route("notes.txt"), ChunkStrategy::Headings);
}

#[test]
fn strategy_parses_from_cli_names() {
    assert_eq!("Principles".parse::<ChunkStrategy>().unwrap(), ChunkStrategy::Principles);
    assert_eq!("window".parse::<ChunkStrategy>().unwrap(), ChunkStrategy::Window);
    assert!("semantic".parse::<ChunkStrategy>().is_err());
}
