use super::span::Span;

/// A reference to a single line of the text with its byte spans.
#[derive(Debug, Clone, Copy)]
pub struct LineRef<'a> {
    /// Byte span of this line (includes the line terminator if present).
    pub span: Span,
    /// Byte span of the line content, without `\n` or `\r\n`.
    pub content: Span,
    /// The line content without its terminator.
    pub text: &'a str,
}

/// Returns an iterator over lines with their byte spans.
///
/// Splits inclusively on `\n` so that consecutive line spans tile the whole
/// text; the terminator is then stripped from `content`/`text`.
pub fn lines_with_spans(text: &str) -> impl Iterator<Item = LineRef<'_>> + '_ {
    let mut offset = 0usize;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        let body = raw.trim_end_matches('\n');
        let body = body.strip_suffix('\r').unwrap_or(body);
        LineRef {
            span: Span { start, end: offset },
            content: Span {
                start,
                end: start + body.len(),
            },
            text: body,
        }
    })
}
