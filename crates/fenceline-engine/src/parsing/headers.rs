use super::{
    kinds::Header,
    text::lines_with_spans,
    types::HeaderSpan,
};

/// Every `#`-prefixed header line in document order.
pub fn scan_headers(text: &str) -> Vec<HeaderSpan> {
    lines_with_spans(text)
        .filter_map(|line| {
            Header::level(line.text).map(|level| HeaderSpan {
                span: line.content,
                level,
            })
        })
        .collect()
}
