use crate::parsing::{Scan, Span};

fn in_bounds(sp: Span, n: usize) -> bool {
    sp.start <= sp.end && sp.end <= n
}

fn ascending<T>(items: &[T], start: impl Fn(&T) -> usize) -> bool {
    items.windows(2).all(|w| start(&w[0]) <= start(&w[1]))
}

/// Validates scanner output invariants.
///
/// Asserts that:
/// - All spans are within text bounds
/// - Every category is in ascending start order
/// - Code blocks do not overlap and their inner span lies within the block
/// - Every matched pair opens before it closes, and pairs nest properly
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(text: &str, scan: &Scan) {
    let n = text.len();

    if let Some(fm) = scan.frontmatter {
        assert!(in_bounds(fm, n), "frontmatter out of bounds: {fm:?} (len {n})");
    }
    for h in &scan.headers {
        assert!(in_bounds(h.span, n), "header out of bounds: {h:?} (len {n})");
        assert!(h.level >= 1, "header level must be >= 1: {h:?}");
    }
    for m in &scan.math {
        assert!(in_bounds(m.span, n), "math span out of bounds: {m:?} (len {n})");
    }
    for m in &scan.markers {
        assert!(in_bounds(m.line, n), "marker out of bounds: {m:?} (len {n})");
        assert!(m.weight >= 3, "marker weight below 3: {m:?}");
    }

    for b in &scan.code_blocks {
        assert!(in_bounds(b.span, n), "code block out of bounds: {b:?} (len {n})");
        assert!(
            b.span.encloses(b.inner),
            "inner span not contained in block: inner {:?}, block {:?}",
            b.inner,
            b.span
        );
    }
    for w in scan.code_blocks.windows(2) {
        assert!(
            !w[0].span.overlaps(w[1].span),
            "code blocks overlap: {:?} and {:?}",
            w[0].span,
            w[1].span
        );
    }

    assert!(ascending(&scan.headers, |h| h.span.start), "headers out of order");
    assert!(ascending(&scan.math, |m| m.span.start), "math out of order");
    assert!(ascending(&scan.markers, |m| m.line.start), "markers out of order");
    assert!(
        ascending(&scan.code_blocks, |b| b.span.start),
        "code blocks out of order"
    );

    let pairs = &scan.nesting.pairs;
    for p in pairs {
        assert!(
            p.opener_line.start < p.closer_line.start,
            "pair closes before it opens: {p:?}"
        );
    }
    for (i, a) in pairs.iter().enumerate() {
        for b in &pairs[i + 1..] {
            let (sa, sb) = (a.span(), b.span());
            let disjoint = !sa.overlaps(sb);
            let nested = sa.encloses(sb) || sb.encloses(sa);
            assert!(disjoint || nested, "pairs cross: {a:?} and {b:?}");
            if sa.encloses(sb) {
                assert!(a.depth < b.depth, "outer pair not shallower: {a:?} {b:?}");
            } else if sb.encloses(sa) {
                assert!(b.depth < a.depth, "outer pair not shallower: {b:?} {a:?}");
            }
        }
    }
}
