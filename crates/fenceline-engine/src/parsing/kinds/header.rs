use std::sync::OnceLock;

use regex::Regex;

/// ATX-style header lines: `#`, `##`, ... followed by a space.
pub struct Header;

impl Header {
    pub const HASH: char = '#';

    fn header_re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"^(#+) ").expect("Invalid header regex"))
    }

    /// Header level of a line (number of leading `#`), if it is a header.
    pub fn level(line: &str) -> Option<usize> {
        if !line.starts_with(Self::HASH) {
            return None;
        }
        Self::header_re().captures(line).map(|c| c[1].len())
    }
}
