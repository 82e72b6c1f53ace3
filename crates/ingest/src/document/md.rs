use super::txt::decode_utf8;
use super::{ExtractionError, PageContent};

/// Markdown is read as text with `#` heading markers removed, so that
/// "## Article 5" reaches the heading detector as "Article 5".
pub fn extract_md(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let text = decode_utf8(bytes);

    let text = text
        .lines()
        .map(|line| {
            if line.starts_with('#') {
                line.trim_start_matches('#').trim_start()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(vec![PageContent { page_number: 1, text }])
}
