use std::sync::OnceLock;

use regex::Regex;

/// Generic container (div/callout) fence syntax: a run of colons.
///
/// The run length is the marker's weight. Only markers of equal weight pair up.
pub struct ContainerFence;

impl ContainerFence {
    pub const COLON: char = ':';
    pub const MIN_WEIGHT: usize = 3;
    pub const COMMENT_OPEN: &'static str = "<!--";
    pub const COMMENT_CLOSE: &'static str = "-->";

    fn marker_re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"^(:{3,})(.*)$").expect("Invalid container marker regex"))
    }

    /// Splits a marker line into `(weight, trailing)`; `None` for any other line.
    pub fn sig(line: &str) -> Option<(usize, &str)> {
        if !line.starts_with(Self::COLON) {
            return None;
        }
        let c = Self::marker_re().captures(line)?;
        let weight = c.get(1)?.as_str().len();
        let trailing = c.get(2).map_or("", |m| m.as_str());
        Some((weight, trailing))
    }

    /// True when `trailing` (already trimmed) is wholly `<!-- ... -->` comment text.
    pub fn is_comment_only(trailing: &str) -> bool {
        trailing.len() >= Self::COMMENT_OPEN.len() + Self::COMMENT_CLOSE.len()
            && trailing.starts_with(Self::COMMENT_OPEN)
            && trailing.ends_with(Self::COMMENT_CLOSE)
    }
}
