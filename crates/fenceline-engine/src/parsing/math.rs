use super::{
    cursor::Cursor,
    kinds::Math,
    text::Span,
    types::{MathKind, MathSpan},
};

/// Finds `$$...$$` spans. The first `$$` opens, the next one closes, across lines.
pub fn scan_display_math(text: &str) -> Vec<MathSpan> {
    Math::display_re()
        .find_iter(text)
        .map(|m| MathSpan {
            span: Span {
                start: m.start(),
                end: m.end(),
            },
            kind: MathKind::Display,
        })
        .collect()
}

/// Finds `$...$` spans delimited by lone dollars on a single line. Content
/// never holds another dollar, so an inline span cannot swallow a `$$` pair.
///
/// `masked` must be sorted by start. Inline spans never start inside a masked
/// region and never close past the start of the next one.
pub fn scan_inline_math(text: &str, masked: &[Span]) -> Vec<MathSpan> {
    let bytes = text.as_bytes();
    let mut cur = Cursor::new(text);
    let mut masks = masked.iter().peekable();
    let mut out = vec![];

    while !cur.eof() {
        while masks.next_if(|m| m.end <= cur.pos()).is_some() {}
        let limit = match masks.peek() {
            Some(m) if m.start <= cur.pos() => {
                cur.seek(m.end);
                continue;
            }
            Some(m) => m.start,
            None => text.len(),
        };

        if !Math::is_lone_dollar(bytes, cur.pos()) {
            cur.bump();
            continue;
        }

        let start = cur.pos();
        cur.bump();
        // The next dollar on the line must itself be lone, otherwise the
        // opener is just a dollar sign.
        if let Some(close) = cur
            .find_before(limit, b'\n', |j| bytes[j] == b'$')
            .filter(|&j| Math::is_lone_dollar(bytes, j))
        {
            out.push(MathSpan {
                span: Span {
                    start,
                    end: close + 1,
                },
                kind: MathKind::Inline,
            });
            cur.seek(close + 1);
        }
    }
    out
}

/// Runs both math passes and merges them by start offset.
///
/// With `mask_display` unset the passes are independent and a lone `$x$`
/// inside a display region is reported by both.
pub fn scan_math(text: &str, mask_display: bool) -> Vec<MathSpan> {
    let display = scan_display_math(text);
    let masked: Vec<Span> = if mask_display {
        display.iter().map(|m| m.span).collect()
    } else {
        vec![]
    };
    let mut all = display;
    all.extend(scan_inline_math(text, &masked));
    all.sort_by_key(|m| (m.span.start, m.span.end));
    all
}
