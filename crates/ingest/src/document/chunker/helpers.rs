//! Normalization, windowing and block merging used by chunking strategies.

use super::types::Block;

/// Unify line endings, drop trailing spaces/tabs before line breaks and
/// collapse three or more consecutive newlines into a single blank line.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let breaks = unified.matches('\n').count();
    let joined = unified
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i < breaks {
                line.trim_end_matches([' ', '\t'])
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut out = String::with_capacity(joined.len());
    let mut newline_run = 0usize;
    for ch in joined.chars() {
        if ch == '\n' {
            newline_run += 1;
            if newline_run > 2 {
                continue;
            }
        } else {
            newline_run = 0;
        }
        out.push(ch);
    }
    out
}

/// Overlap actually applied between windows. Anything that would stop the
/// window start from advancing degrades to zero.
pub(crate) fn effective_overlap(max_chars: usize, overlap: usize) -> usize {
    if overlap >= max_chars {
        0
    } else {
        overlap
    }
}

/// Slice `text` into windows of at most `max_chars` characters, adjacent
/// windows sharing `overlap` characters. Empty text yields no windows.
pub(crate) fn split_windows(text: &str, max_chars: usize, overlap: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let max_chars = max_chars.max(1);
    let overlap = effective_overlap(max_chars, overlap);

    // Byte offset of every char boundary, including the end of the text.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let total = bounds.len() - 1;

    let mut windows = Vec::with_capacity(total / (max_chars - overlap) + 1);
    let mut start = 0usize;
    loop {
        let end = (start + max_chars).min(total);
        windows.push(text[bounds[start]..bounds[end]].to_string());
        if end == total {
            break;
        }
        start = end - overlap;
    }
    windows
}

/// Fold undersized blocks into their successors.
///
/// A buffer absorbs following blocks while its rendered length stays below
/// `min_chars`, appending each one's full render to its body and keeping its
/// own title. An untitled buffer stays untitled, so a preamble renders ahead of
/// the heading that follows it; a blank untitled buffer is replaced outright.
/// The trailing buffer is always emitted.
pub fn merge_blocks(blocks: Vec<Block>, min_chars: usize) -> Vec<Block> {
    let mut merged: Vec<Block> = Vec::with_capacity(blocks.len());
    let mut buffer: Option<Block> = None;

    for block in blocks {
        buffer = Some(match buffer.take() {
            None => block,
            Some(buf) if buf.title.is_none() && buf.body.trim().is_empty() => block,
            Some(mut buf) if buf.rendered_len() < min_chars => {
                buf.body = format!("{}\n\n{}", buf.body, block.render()).trim().to_string();
                buf
            }
            Some(buf) => {
                merged.push(buf);
                block
            }
        });
    }

    merged.extend(buffer);
    merged
}
