use super::{
    kinds::Frontmatter,
    text::{Span, lines_with_spans},
};

/// Finds the frontmatter block, if the document opens with one.
///
/// Leading blank lines are skipped; the first non-blank line must be exactly
/// `---`. The block runs to the start of the line after the next `---` line
/// (end of text if that delimiter is the last line). A missing closing
/// delimiter means no frontmatter at all.
pub fn scan_frontmatter(text: &str) -> Option<Span> {
    let mut lines = lines_with_spans(text).skip_while(|l| l.text.trim().is_empty());

    let opener = lines.next()?;
    if !Frontmatter::is_delimiter(opener.text) {
        return None;
    }

    let closer = lines.find(|l| Frontmatter::is_delimiter(l.text))?;
    Some(Span {
        start: opener.span.start,
        end: closer.span.end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::text::slice;

    #[test]
    fn frontmatter_block_includes_closing_line() {
        let text = "---\ntitle: x\n---\nbody\n";
        let fm = scan_frontmatter(text).expect("frontmatter");
        assert_eq!(slice(text, fm), "---\ntitle: x\n---\n");
    }

    #[test]
    fn leading_blank_lines_are_skipped() {
        let text = "\n  \n---\na: 1\n---";
        let fm = scan_frontmatter(text).expect("frontmatter");
        assert_eq!(fm.start, 4);
        assert_eq!(fm.end, text.len());
    }

    #[test]
    fn unclosed_frontmatter_is_not_reported() {
        assert_eq!(scan_frontmatter("---\ntitle: x\nbody\n"), None);
    }

    #[test]
    fn must_be_first_non_blank_line() {
        assert_eq!(scan_frontmatter("intro\n---\na\n---\n"), None);
    }

    #[test]
    fn empty_text_has_none() {
        assert_eq!(scan_frontmatter(""), None);
    }
}
