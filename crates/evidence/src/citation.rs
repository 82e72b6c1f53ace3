//! Snippets and human-readable citation lists.

use regintel_core::EvidenceItem;

pub const DEFAULT_SNIPPET_CHARS: usize = 280;

const ELLIPSIS: char = '…';

/// Flatten line breaks, trim, and cap at `max_chars` characters. A cut
/// snippet ends with `…`, which counts toward the cap.
pub fn make_snippet(text: &str, max_chars: usize) -> String {
    let flat = text.replace(['\r', '\n'], " ");
    let flat = flat.trim();
    if flat.chars().count() <= max_chars {
        return flat.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = flat.chars().take(max_chars - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// One line of a citation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitationEntry {
    Evidence(EvidenceItem),
    /// A bare source label with no snippet.
    Label(String),
}

impl From<EvidenceItem> for CitationEntry {
    fn from(item: EvidenceItem) -> Self {
        CitationEntry::Evidence(item)
    }
}

impl From<&str> for CitationEntry {
    fn from(label: &str) -> Self {
        CitationEntry::Label(label.to_string())
    }
}

impl From<String> for CitationEntry {
    fn from(label: String) -> Self {
        CitationEntry::Label(label)
    }
}

/// Render entries as a bulleted list with the default snippet cap.
pub fn format_citations(entries: &[CitationEntry]) -> String {
    format_citations_with(entries, DEFAULT_SNIPPET_CHARS)
}

/// Render entries as a bulleted list, one per line. Empty input renders "".
pub fn format_citations_with(entries: &[CitationEntry], snippet_chars: usize) -> String {
    entries
        .iter()
        .map(|entry| match entry {
            CitationEntry::Label(label) => format!("- {label}"),
            CitationEntry::Evidence(item) => {
                let snippet = make_snippet(&item.snippet, snippet_chars);
                if snippet.is_empty() {
                    format!("- {}", item.source)
                } else {
                    format!("- **{}** — “{}”", item.source, snippet)
                }
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
