// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_notebook(sections: usize) -> String {
    let base = "## Section\n\nProse with $x^2$ inline math.\n\n::: {.callout-note}\n```{python}\n# setup\nx = 42\n```\n:::: {.inner}\n$$\n\\int_0^1 x\\,dx\n$$\n::::\n:::\n\n```rust\nfn main() {}\n```\n\n";
    let mut content = String::from("---\ntitle: bench\n---\n");
    content.push_str(&base.repeat(sections));
    content
}

#[allow(dead_code)]
pub fn generate_deep_nesting(depth: usize) -> String {
    let mut content = String::new();
    for level in 0..depth {
        let marker = ":".repeat(3 + level);
        content.push_str(&format!("{marker} {{.level-{level}}}\ntext\n"));
    }
    for level in (0..depth).rev() {
        content.push_str(&":".repeat(3 + level));
        content.push('\n');
    }
    content
}
