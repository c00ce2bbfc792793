use std::sync::OnceLock;

use regex::Regex;

/// LaTeX math delimiters: `$...$` inline, `$$...$$` display.
pub struct Math;

impl Math {
    pub const DOLLAR: u8 = b'$';
    pub const DISPLAY: &'static [u8; 2] = b"$$";

    /// Non-greedy display span; `(?s)` lets it run across lines.
    pub fn display_re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"(?s)\$\$.*?\$\$").expect("Invalid display math regex"))
    }

    /// True if the byte at `i` is a `$` with no `$` directly before or after it.
    pub fn is_lone_dollar(bytes: &[u8], i: usize) -> bool {
        bytes.get(i) == Some(&Self::DOLLAR)
            && (i == 0 || bytes[i - 1] != Self::DOLLAR)
            && bytes.get(i + 1) != Some(&Self::DOLLAR)
    }
}
