//! Groups code block bodies by language for bulk dispatch.

use serde::Serialize;

use crate::parsing::{CodeBlock, Span, text::slice};

/// Which blocks to take relative to a reference offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Blocks ending strictly before the offset.
    Before(usize),
    /// Blocks starting strictly after the offset.
    After(usize),
    All,
}

impl Region {
    pub fn includes(self, span: Span) -> bool {
        match self {
            Region::Before(at) => span.end < at,
            Region::After(at) => span.start > at,
            Region::All => true,
        }
    }
}

/// The joined bodies of every block sharing one language key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageGroup {
    pub language: String,
    /// Block bodies in document order, joined with `\n`.
    pub text: String,
    /// Number of blocks joined into `text`.
    pub count: usize,
}

/// Language groups in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub groups: Vec<LanguageGroup>,
}

impl Aggregate {
    pub fn get(&self, language: &str) -> Option<&LanguageGroup> {
        self.groups.iter().find(|g| g.language == language)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of blocks across all groups.
    pub fn block_count(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    fn add(&mut self, language: String, body: &str) {
        match self.groups.iter_mut().find(|g| g.language == language) {
            Some(group) => {
                group.text.push('\n');
                group.text.push_str(body);
                group.count += 1;
            }
            None => self.groups.push(LanguageGroup {
                language,
                text: body.to_string(),
                count: 1,
            }),
        }
    }
}

/// Aggregates blocks in `region` keyed by their raw language tag.
pub fn aggregate<'a, I>(text: &str, blocks: I, region: Region) -> Aggregate
where
    I: IntoIterator<Item = &'a CodeBlock>,
{
    aggregate_by(text, blocks, region, |b| b.language.clone())
}

/// Aggregates blocks in `region` under a caller-chosen key.
///
/// Blocks must be in document order; group order follows the first block seen
/// for each key.
pub fn aggregate_by<'a, I, K>(text: &str, blocks: I, region: Region, mut key: K) -> Aggregate
where
    I: IntoIterator<Item = &'a CodeBlock>,
    K: FnMut(&CodeBlock) -> String,
{
    let mut out = Aggregate::default();
    for block in blocks.into_iter().filter(|b| region.includes(b.span)) {
        out.add(key(block), slice(text, block.inner));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::scan_code_blocks;

    #[test]
    fn groups_bodies_by_language() {
        let text = "```{python}\na\n```\n\n```{python}\nb\n```\n";
        let blocks = scan_code_blocks(text);
        let agg = aggregate(text, &blocks, Region::All);
        assert_eq!(
            agg.groups,
            vec![LanguageGroup {
                language: "python".into(),
                text: "a\nb".into(),
                count: 2,
            }]
        );
    }

    #[test]
    fn language_order_is_first_seen() {
        let text = "```{r}\nr1\n```\n```{python}\np1\n```\n```{r}\nr2\n```\n";
        let blocks = scan_code_blocks(text);
        let agg = aggregate(text, &blocks, Region::All);
        let order: Vec<_> = agg.groups.iter().map(|g| g.language.as_str()).collect();
        assert_eq!(order, vec!["r", "python"]);
        assert_eq!(agg.get("r").map(|g| g.text.as_str()), Some("r1\nr2"));
        assert_eq!(agg.block_count(), 3);
    }

    #[test]
    fn before_and_after_are_strict() {
        let text = "```{python}\na\n```\nmid\n```{python}\nb\n```\n";
        let blocks = scan_code_blocks(text);
        let first_end = blocks[0].span.end;

        let before = aggregate(text, &blocks, Region::Before(first_end));
        assert!(before.is_empty(), "a block ending at the offset is not before it");

        let before = aggregate(text, &blocks, Region::Before(first_end + 1));
        assert_eq!(before.get("python").map(|g| g.text.as_str()), Some("a"));

        let after = aggregate(text, &blocks, Region::After(blocks[1].span.start));
        assert!(after.is_empty());

        let after = aggregate(text, &blocks, Region::After(first_end));
        assert_eq!(after.get("python").map(|g| g.text.as_str()), Some("b"));
    }

    #[test]
    fn multi_line_bodies_keep_inner_newlines() {
        let text = "```{python}\nx = 1\ny = 2\n```\n```{python}\nprint(x)\n```";
        let blocks = scan_code_blocks(text);
        let agg = aggregate(text, &blocks, Region::All);
        assert_eq!(
            agg.get("python").map(|g| g.text.as_str()),
            Some("x = 1\ny = 2\nprint(x)")
        );
    }

    #[test]
    fn custom_key_merges_groups() {
        let text = "```{py}\na\n```\n```{python}\nb\n```\n";
        let blocks = scan_code_blocks(text);
        let agg = aggregate_by(text, &blocks, Region::All, |_| "python".to_string());
        assert_eq!(agg.groups.len(), 1);
        assert_eq!(agg.groups[0].text, "a\nb");
        assert_eq!(agg.groups[0].count, 2);
    }

    #[test]
    fn no_blocks_no_groups() {
        let agg = aggregate("plain", &Vec::<CodeBlock>::new(), Region::All);
        assert!(agg.is_empty());
        assert_eq!(agg.block_count(), 0);
    }
}
