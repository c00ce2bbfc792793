//! Whole-pipeline tests for the scanning module.
//!
//! Per-scanner edge cases live next to each scanner; these exercise the
//! `scan_document` facade and the invariants that tie categories together.

use rstest::rstest;

use crate::parsing::{
    ScanOptions, Span, UnmatchedReason, scan_document, scan_document_with, snapshot,
    text::slice,
};

const MIXED: &str = "---\ntitle: demo\n---\n\
# Intro\n\
Some $x$ math.\n\
::: {.callout}\n\
```{python}\n# not a header for decoration\nprint(1)\n```\n\
:::: {.inner}\n\
$$\na $b$\n$$\n\
::::\n\
:::\n\
## Tail\n\
```bash\nls\n";

#[test]
fn rescanning_is_idempotent() {
    let first = scan_document(MIXED);
    let second = scan_document(MIXED);
    assert_eq!(first, second);
}

#[test]
fn mixed_document_passes_invariants() {
    let scan = scan_document(MIXED);
    snapshot::invariants(MIXED, &scan);

    assert!(scan.frontmatter.is_some());
    assert_eq!(scan.code_blocks.len(), 2);
    assert!(scan.code_blocks[0].interactive);
    assert!(!scan.code_blocks[1].is_closed());
    assert_eq!(scan.nesting.pairs.len(), 2);
    assert!(scan.nesting.unmatched.is_empty());
}

#[test]
fn header_scan_is_independent_of_code_blocks() {
    // The python comment line still matches the header shape; filtering it
    // out is the decoration layer's job.
    let scan = scan_document(MIXED);
    let levels: Vec<_> = scan.headers.iter().map(|h| h.level).collect();
    assert_eq!(levels, vec![1, 1, 2]);
}

#[test]
fn nested_containers_end_to_end() {
    let text = "::: {.a}\n:::: {.b}\n::::\n:::\n";
    let scan = scan_document(text);
    let pairs: Vec<_> = scan
        .nesting
        .pairs
        .iter()
        .map(|p| (p.weight, p.depth))
        .collect();
    assert_eq!(pairs, vec![(4, 1), (3, 0)]);
    assert!(scan.nesting.unmatched.is_empty());
}

#[test]
fn weight_mismatch_end_to_end() {
    let text = "::: {.a}\n::::\n";
    let scan = scan_document(text);
    assert!(scan.nesting.pairs.is_empty());
    let unmatched: Vec<_> = scan
        .nesting
        .unmatched
        .iter()
        .map(|u| (slice(text, u.line), u.weight, u.reason))
        .collect();
    assert_eq!(
        unmatched,
        vec![
            ("::::", 4, UnmatchedReason::StrayCloser),
            ("::: {.a}", 3, UnmatchedReason::UnclosedOpener),
        ]
    );
}

#[test]
fn unclosed_fence_end_to_end() {
    let text = "```{python}\nprint(1)\n";
    let scan = scan_document(text);
    assert_eq!(scan.code_blocks.len(), 1);
    assert_eq!(scan.code_blocks[0].language, "python");
    assert_eq!(scan.code_blocks[0].span, Span::new(0, text.len()));
}

#[rstest]
#[case(false, 2)]
#[case(true, 1)]
fn display_masking_option(#[case] mask: bool, #[case] expected: usize) {
    let text = "$$ a $b$ $$";
    let scan = scan_document_with(
        text,
        ScanOptions {
            mask_display_math: mask,
        },
    );
    assert_eq!(scan.math.len(), expected);
}

#[rstest]
#[case("")]
#[case("\n\n\n")]
#[case(":::\n:::\n:::")]
#[case("```")]
#[case("$")]
#[case("---")]
#[case("é ü $ñ$ ::: ∑")]
fn degenerate_inputs_are_total(#[case] text: &str) {
    let scan = scan_document(text);
    snapshot::invariants(text, &scan);
}

#[test]
fn empty_document_has_nothing() {
    let scan = scan_document("");
    assert!(scan.code_blocks.is_empty());
    assert!(scan.markers.is_empty());
    assert!(scan.math.is_empty());
    assert!(scan.headers.is_empty());
    assert_eq!(scan.frontmatter, None);
}
