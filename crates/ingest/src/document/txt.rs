use super::{ExtractionError, PageContent};

pub(crate) fn decode_utf8(bytes: &[u8]) -> String {
    // Try UTF-8 first, fall back to lossy conversion
    String::from_utf8(bytes.to_vec()).unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned())
}

pub fn extract_txt(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    Ok(vec![PageContent {
        page_number: 1,
        text: decode_utf8(bytes),
    }])
}
