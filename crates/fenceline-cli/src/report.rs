use fenceline_engine::parsing::{MathKind, UnmatchedReason, text::preview};
use fenceline_engine::{Scan, Span};

const PREVIEW: usize = 40;

fn range(sp: Span) -> String {
    format!("{}..{}", sp.start, sp.end)
}

/// Human-readable structure listing for `fenceline scan`.
pub fn structure_report(text: &str, scan: &Scan) -> Vec<String> {
    let mut lines = Vec::new();

    match scan.frontmatter {
        Some(fm) => lines.push(format!("frontmatter {}", range(fm))),
        None => lines.push("frontmatter none".to_string()),
    }

    lines.push(format!("headers ({})", scan.headers.len()));
    for h in &scan.headers {
        lines.push(format!(
            "  h{} {} {}",
            h.level,
            range(h.span),
            preview(text, h.span, PREVIEW)
        ));
    }

    lines.push(format!("code blocks ({})", scan.code_blocks.len()));
    for b in &scan.code_blocks {
        let kind = if b.interactive { "interactive" } else { "passive" };
        let closed = if b.is_closed() { "" } else { " unclosed" };
        lines.push(format!(
            "  {} {kind} {}{closed} ({} body bytes)",
            b.language,
            range(b.span),
            b.inner.len()
        ));
    }

    lines.push(format!("containers ({})", scan.nesting.pairs.len()));
    let mut pairs: Vec<_> = scan.nesting.pairs.iter().collect();
    pairs.sort_by_key(|p| p.opener_line.start);
    for p in pairs {
        lines.push(format!(
            "  {}w{} {} {}",
            "  ".repeat(p.depth),
            p.weight,
            range(p.span()),
            preview(text, p.opener_line, PREVIEW)
        ));
    }

    if !scan.nesting.unmatched.is_empty() {
        lines.push(format!("unmatched markers ({})", scan.nesting.unmatched.len()));
        for u in &scan.nesting.unmatched {
            let reason = match u.reason {
                UnmatchedReason::StrayCloser => "stray closer",
                UnmatchedReason::UnclosedOpener => "unclosed opener",
            };
            lines.push(format!("  {reason} w{} {}", u.weight, range(u.line)));
        }
    }

    lines.push(format!("math ({})", scan.math.len()));
    for m in &scan.math {
        let kind = match m.kind {
            MathKind::Inline => "inline",
            MathKind::Display => "display",
        };
        lines.push(format!(
            "  {kind} {} {}",
            range(m.span),
            preview(text, m.content(), PREVIEW).replace('\n', " ")
        ));
    }

    lines
}
