use fenceline_engine::parsing::{scan_document, snapshot};

#[test]
fn fixture_code_and_math() {
    assert_fixture("code_and_math");
}

#[test]
fn fixture_nested_callouts() {
    assert_fixture("nested_callouts");
}

#[test]
fn fixture_broken_markers() {
    assert_fixture("broken_markers");
}

#[test]
fn fixture_unclosed_fence() {
    assert_fixture("unclosed_fence");
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let md = std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap();

    let scan = scan_document(&md);
    snapshot::invariants(&md, &scan);

    let snap = snapshot::normalize(&scan);
    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_yaml_snapshot!(name, snap);
    });
}

/// Every span in a scan slices back to text that starts with the expected glyph.
#[test]
fn spans_point_at_their_delimiters() {
    let md = std::fs::read_to_string(format!(
        "{}/tests/fixtures/code_and_math.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    let scan = scan_document(&md);

    for b in &scan.code_blocks {
        assert!(md[b.span.start..b.span.end].starts_with("```"));
    }
    for h in &scan.headers {
        assert!(md[h.span.start..h.span.end].starts_with('#'));
    }
    for m in &scan.math {
        assert!(md[m.span.start..m.span.end].starts_with('$'));
        assert!(md[m.span.start..m.span.end].ends_with('$'));
    }
}
