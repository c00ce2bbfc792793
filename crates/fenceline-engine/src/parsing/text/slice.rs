use super::span::Span;

/// Extracts the text for a span, clamped to the text and to char boundaries.
///
/// Stale spans from an older scan never panic; they just yield whatever text
/// now sits in the clamped range.
pub fn slice(text: &str, sp: Span) -> &str {
    let start = floor_char_boundary(text, sp.start.min(text.len()));
    let end = floor_char_boundary(text, sp.end.min(text.len())).max(start);
    &text[start..end]
}

/// Extracts text for a span, truncating to `max` bytes with "..." suffix if needed.
///
/// Used for human-readable snapshot and report output.
pub fn preview(text: &str, sp: Span, max: usize) -> String {
    let s = slice(text, sp);
    if s.len() > max {
        let cut = floor_char_boundary(s, max);
        format!("{}...", &s[..cut])
    } else {
        s.to_string()
    }
}

/// Largest char boundary `<= index`.
pub fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}
