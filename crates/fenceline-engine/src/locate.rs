//! Point queries over scanned code blocks.

use crate::parsing::CodeBlock;

/// Returns the code block whose span contains `offset` (both ends inclusive).
///
/// Blocks from one scan never overlap, so at most one should match. If a
/// caller passes overlapping blocks anyway, the last match in iteration order
/// is returned.
pub fn block_at<'a, I>(blocks: I, offset: usize) -> Option<&'a CodeBlock>
where
    I: IntoIterator<Item = &'a CodeBlock>,
{
    blocks
        .into_iter()
        .filter(|b| b.span.contains_inclusive(offset))
        .last()
}
