use serde::Serialize;

use super::text::Span;

/// A fenced code block found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Opener line start to the end of the closing fence line (terminator
    /// excluded), or to end of document when the fence is never closed.
    pub span: Span,
    /// Raw language tag as written. Alias resolution happens at dispatch.
    pub language: String,
    /// Braced `{lang}` form: the block can be sent to a session.
    pub interactive: bool,
    /// The opening fence line, without terminator.
    pub opener_line: Span,
    /// The closing fence line, without terminator. `None` if unclosed.
    pub closer_line: Option<Span>,
    /// Lines strictly between the fences, without the final line terminator.
    pub inner: Span,
}

impl CodeBlock {
    pub fn is_closed(&self) -> bool {
        self.closer_line.is_some()
    }
}

/// A `:::` line with its weight and opener/closer classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerMarker {
    /// The marker line, without terminator.
    pub line: Span,
    /// Number of consecutive colons, always >= 3.
    pub weight: usize,
    pub is_opening: bool,
}

/// An opener paired with the closer of the same weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchedPair {
    pub opener_line: Span,
    pub closer_line: Span,
    pub weight: usize,
    /// Nesting depth when the opener was pushed; 0 is outermost.
    pub depth: usize,
}

impl MatchedPair {
    /// Opener line start to closer line end.
    pub fn span(&self) -> Span {
        Span {
            start: self.opener_line.start,
            end: self.closer_line.end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnmatchedReason {
    /// A closer whose weight differs from the innermost open marker, or with
    /// nothing open at all.
    StrayCloser,
    /// An opener still open at end of document.
    UnclosedOpener,
}

/// A container marker with no structural partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnmatchedMarker {
    pub line: Span,
    pub weight: usize,
    pub reason: UnmatchedReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MathKind {
    Inline,
    Display,
}

impl MathKind {
    /// Byte length of one delimiter for this kind.
    pub fn delimiter_len(self) -> usize {
        match self {
            MathKind::Inline => 1,
            MathKind::Display => 2,
        }
    }
}

/// A math span including its delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MathSpan {
    pub span: Span,
    pub kind: MathKind,
}

impl MathSpan {
    /// The TeX source between the delimiters.
    pub fn content(&self) -> Span {
        let d = self.kind.delimiter_len();
        Span {
            start: self.span.start + d,
            end: self.span.end.saturating_sub(d).max(self.span.start + d),
        }
    }
}

/// A header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderSpan {
    /// The header line, without terminator.
    pub span: Span,
    /// Count of leading `#`, always >= 1.
    pub level: usize,
}
