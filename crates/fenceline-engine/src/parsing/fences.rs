use super::{
    kinds::{CodeFence, FenceSig},
    text::{LineRef, Span, lines_with_spans},
    types::CodeBlock,
};

#[derive(Debug, Clone, Copy)]
enum FenceState<'a> {
    Outside,
    Open {
        run: usize,
        language: &'a str,
        interactive: bool,
        opener: Span,
        body_start: usize,
    },
}

/// Line-at-a-time code fence state machine.
///
/// Interactive and passive openers share one pass, so blocks never overlap:
/// while a block is open every line is body text until a closing fence.
pub struct FenceScanner<'a> {
    text: &'a str,
    state: FenceState<'a>,
    out: Vec<CodeBlock>,
}

impl<'a> FenceScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            state: FenceState::Outside,
            out: vec![],
        }
    }

    pub fn push(&mut self, line: &LineRef<'a>) {
        let sig = CodeFence::sig(line.text);
        match self.state {
            FenceState::Outside => self.try_open(line, sig),
            FenceState::Open { run, .. } => {
                if CodeFence::closes(run, sig) {
                    self.close(Some(line));
                }
            }
        }
    }

    pub fn finish(mut self) -> Vec<CodeBlock> {
        // EOF flush: an unclosed fence runs to end of document
        if matches!(self.state, FenceState::Open { .. }) {
            self.close(None);
        }
        self.out
    }

    fn try_open(&mut self, line: &LineRef<'a>, sig: Option<FenceSig<'a>>) {
        let (run, language, interactive) = match sig {
            Some(FenceSig::Interactive { run, language }) => (run, language, true),
            Some(FenceSig::Passive { run, language }) => (run, language, false),
            Some(FenceSig::Bare { .. }) | None => return,
        };
        self.state = FenceState::Open {
            run,
            language,
            interactive,
            opener: line.content,
            body_start: line.span.end,
        };
    }

    fn close(&mut self, closer: Option<&LineRef<'a>>) {
        let prev = std::mem::replace(&mut self.state, FenceState::Outside);
        let FenceState::Open {
            language,
            interactive,
            opener,
            body_start,
            ..
        } = prev
        else {
            return;
        };

        let (end, body_end) = match closer {
            Some(c) => (c.content.end, c.span.start),
            None => (self.text.len(), self.text.len()),
        };
        let inner_end = strip_final_terminator(self.text, body_start, body_end);

        log::trace!(
            "code block {language:?} at {}..{end} (interactive: {interactive}, closed: {})",
            opener.start,
            closer.is_some()
        );

        self.out.push(CodeBlock {
            span: Span {
                start: opener.start,
                end,
            },
            language: language.to_string(),
            interactive,
            opener_line: opener,
            closer_line: closer.map(|c| c.content),
            inner: Span {
                start: body_start,
                end: inner_end,
            },
        });
    }
}

/// Moves `end` back over one trailing `\n` or `\r\n`, never before `start`.
fn strip_final_terminator(text: &str, start: usize, end: usize) -> usize {
    let body = &text.as_bytes()[start..end];
    let trimmed = body
        .strip_suffix(b"\n")
        .map(|b| b.strip_suffix(b"\r").unwrap_or(b))
        .unwrap_or(body);
    start + trimmed.len()
}

/// Finds every fenced code block in document order.
pub fn scan_code_blocks(text: &str) -> Vec<CodeBlock> {
    let mut scanner = FenceScanner::new(text);
    for line in lines_with_spans(text) {
        scanner.push(&line);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::text::slice;

    #[test]
    fn closed_interactive_block() {
        let text = "intro\n```{python}\nx = 1\n```\nafter\n";
        let blocks = scan_code_blocks(text);
        assert_eq!(blocks.len(), 1);
        let b = &blocks[0];
        assert_eq!(b.language, "python");
        assert!(b.interactive);
        assert!(b.is_closed());
        assert_eq!(slice(text, b.span), "```{python}\nx = 1\n```");
        assert_eq!(slice(text, b.inner), "x = 1");
        assert_eq!(slice(text, b.opener_line), "```{python}");
        assert_eq!(b.closer_line.map(|c| slice(text, c)), Some("```"));
    }

    #[test]
    fn passive_block_is_not_interactive() {
        let blocks = scan_code_blocks("```rust\nfn main() {}\n```\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language, "rust");
        assert!(!blocks[0].interactive);
    }

    #[test]
    fn unclosed_block_runs_to_end_of_document() {
        let text = "```{python}\nprint(1)\n";
        let blocks = scan_code_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language, "python");
        assert_eq!(blocks[0].span.end, text.len());
        assert!(!blocks[0].is_closed());
        assert_eq!(slice(text, blocks[0].inner), "print(1)");
    }

    #[test]
    fn fence_lines_inside_a_block_are_body_text() {
        let text = "```{r}\n```python\nnot a block\n```\n";
        let blocks = scan_code_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language, "r");
        assert_eq!(slice(text, blocks[0].inner), "```python\nnot a block");
    }

    #[test]
    fn longer_opener_needs_longer_closer() {
        let text = "````{python}\n```\nstill code\n````\n";
        let blocks = scan_code_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(slice(text, blocks[0].inner), "```\nstill code");
    }

    #[test]
    fn bare_fence_opens_nothing() {
        assert!(scan_code_blocks("```\nplain\n```\n").is_empty());
    }

    #[test]
    fn empty_body() {
        let text = "```{r}\n```";
        let blocks = scan_code_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].inner.is_empty());
        assert_eq!(blocks[0].span.end, text.len());
    }

    #[test]
    fn crlf_terminators_stay_out_of_inner_text() {
        let text = "```{python}\r\na\r\n```\r\n";
        let blocks = scan_code_blocks(text);
        assert_eq!(slice(text, blocks[0].inner), "a");
        assert_eq!(slice(text, blocks[0].opener_line), "```{python}");
    }

    #[test]
    fn blocks_come_back_in_document_order() {
        let text = "```{python}\na\n```\n\n```bash\nls\n```\n```{r}\nb\n```\n";
        let langs: Vec<_> = scan_code_blocks(text)
            .into_iter()
            .map(|b| b.language)
            .collect();
        assert_eq!(langs, vec!["python", "bash", "r"]);
    }
}
