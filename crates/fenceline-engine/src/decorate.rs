//! Turns a scan into styled regions for an editor.
//!
//! The engine never owns styles. It tags each region with a [`Category`] and a
//! [`StyleKey`]; the front end maps keys to colours, faces or markup.

use serde::Serialize;

use crate::parsing::{MathKind, Scan, Span, UnmatchedReason};

/// Decoration layer a region belongs to. Declaration order is the tie-break
/// order for regions starting at the same byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Frontmatter,
    Header,
    CodeBlock,
    Container,
    UnmatchedMarker,
    DisplayMath,
    InlineMath,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Frontmatter,
        Category::Header,
        Category::CodeBlock,
        Category::Container,
        Category::UnmatchedMarker,
        Category::DisplayMath,
        Category::InlineMath,
    ];
}

/// The variant data a front end keys its styles by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StyleKey {
    Frontmatter,
    Header { level: usize },
    CodeBlock { interactive: bool, closed: bool },
    /// Opener and closer lines of a matched pair share one key.
    Container { depth: usize, weight: usize },
    Unmatched { reason: UnmatchedReason },
    Math { kind: MathKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub span: Span,
    pub category: Category,
    pub style: StyleKey,
}

impl Annotation {
    fn new(span: Span, category: Category, style: StyleKey) -> Self {
        Self {
            span,
            category,
            style,
        }
    }
}

/// Builds the full annotation list for a scan, ordered by start then category.
///
/// Header-shaped lines inside a code block (a `# comment` in python, say) are
/// left out.
pub fn decorate(scan: &Scan) -> Vec<Annotation> {
    let mut out = Vec::new();

    if let Some(fm) = scan.frontmatter {
        out.push(Annotation::new(fm, Category::Frontmatter, StyleKey::Frontmatter));
    }

    let in_code = |sp: Span| scan.code_blocks.iter().any(|b| b.span.encloses(sp));
    out.extend(
        scan.headers
            .iter()
            .filter(|h| !in_code(h.span))
            .map(|h| Annotation::new(h.span, Category::Header, StyleKey::Header { level: h.level })),
    );

    out.extend(scan.code_blocks.iter().map(|b| {
        Annotation::new(
            b.span,
            Category::CodeBlock,
            StyleKey::CodeBlock {
                interactive: b.interactive,
                closed: b.is_closed(),
            },
        )
    }));

    for p in &scan.nesting.pairs {
        let style = StyleKey::Container {
            depth: p.depth,
            weight: p.weight,
        };
        out.push(Annotation::new(p.opener_line, Category::Container, style));
        out.push(Annotation::new(p.closer_line, Category::Container, style));
    }

    out.extend(scan.nesting.unmatched.iter().map(|u| {
        Annotation::new(
            u.line,
            Category::UnmatchedMarker,
            StyleKey::Unmatched { reason: u.reason },
        )
    }));

    out.extend(scan.math.iter().map(|m| {
        let category = match m.kind {
            MathKind::Display => Category::DisplayMath,
            MathKind::Inline => Category::InlineMath,
        };
        Annotation::new(m.span, category, StyleKey::Math { kind: m.kind })
    }));

    out.sort_by_key(|a| (a.span.start, a.category));
    out
}

/// Receiver for decoration updates, implemented by a front end.
pub trait DecorationSink {
    /// Removes every region previously applied under `category`.
    fn clear(&mut self, category: Category);
    fn apply(&mut self, annotation: &Annotation);
}

/// Replaces everything a sink shows with `annotations`.
pub fn redecorate<S: DecorationSink + ?Sized>(sink: &mut S, annotations: &[Annotation]) {
    for category in Category::ALL {
        sink.clear(category);
    }
    for a in annotations {
        sink.apply(a);
    }
    log::trace!("redecorated with {} annotations", annotations.len());
}
