use serde::Serialize;

use crate::parsing::{MathKind, Scan, Span, UnmatchedReason};

/// Snapshot of a scan for testing with `insta`.
///
/// Each entry is a one-line summary so snapshot diffs stay readable.
#[derive(Debug, Serialize)]
pub struct Snap {
    /// `start..end` of the frontmatter block.
    pub frontmatter: Option<String>,
    /// `h<level> start..end`
    pub headers: Vec<String>,
    /// `<language> interactive|passive start..end inner start..end closed|unclosed`
    pub code_blocks: Vec<String>,
    /// `w<weight> d<depth> opener start..end closer start..end`
    pub pairs: Vec<String>,
    /// `stray|unclosed w<weight> start..end`
    pub unmatched: Vec<String>,
    /// `inline|display start..end`
    pub math: Vec<String>,
}

fn range(sp: Span) -> String {
    format!("{}..{}", sp.start, sp.end)
}

/// Converts a scan into a serializable snapshot.
pub fn normalize(scan: &Scan) -> Snap {
    Snap {
        frontmatter: scan.frontmatter.map(range),
        headers: scan
            .headers
            .iter()
            .map(|h| format!("h{} {}", h.level, range(h.span)))
            .collect(),
        code_blocks: scan
            .code_blocks
            .iter()
            .map(|b| {
                format!(
                    "{} {} {} inner {} {}",
                    b.language,
                    if b.interactive { "interactive" } else { "passive" },
                    range(b.span),
                    range(b.inner),
                    if b.is_closed() { "closed" } else { "unclosed" },
                )
            })
            .collect(),
        pairs: scan
            .nesting
            .pairs
            .iter()
            .map(|p| {
                format!(
                    "w{} d{} opener {} closer {}",
                    p.weight,
                    p.depth,
                    range(p.opener_line),
                    range(p.closer_line)
                )
            })
            .collect(),
        unmatched: scan
            .nesting
            .unmatched
            .iter()
            .map(|u| {
                let reason = match u.reason {
                    UnmatchedReason::StrayCloser => "stray",
                    UnmatchedReason::UnclosedOpener => "unclosed",
                };
                format!("{reason} w{} {}", u.weight, range(u.line))
            })
            .collect(),
        math: scan
            .math
            .iter()
            .map(|m| {
                let kind = match m.kind {
                    MathKind::Inline => "inline",
                    MathKind::Display => "display",
                };
                format!("{kind} {}", range(m.span))
            })
            .collect(),
    }
}
