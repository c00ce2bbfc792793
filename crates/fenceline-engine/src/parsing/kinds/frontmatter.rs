/// YAML-style frontmatter delimiter.
pub struct Frontmatter;

impl Frontmatter {
    pub const DELIMITER: &'static str = "---";

    /// A delimiter line is exactly `---` (terminator already stripped).
    pub fn is_delimiter(line: &str) -> bool {
        line == Self::DELIMITER
    }
}
