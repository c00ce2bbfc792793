//! # Structural Scanning
//!
//! Recovers the spans an editor needs for decoration and code dispatch, without
//! building a markdown AST.
//!
//! ## Pipeline
//!
//! 1. **Span scanning**: independent single forward passes per category
//!    (`fences`, `classify`, `math`, `headers`, `frontmatter`)
//! 2. **Marker classification** (`classify`): each `:::` line is an opener or
//!    closer based on its own trailing text
//! 3. **Nesting** (`nesting`): a stack matcher pairs openers and closers of
//!    equal weight and reports the leftovers as unmatched
//!
//! ## Key Invariants
//!
//! - Every result list is in ascending start order
//! - Scanning is a pure function of the text; re-scanning yields equal results
//! - Code blocks never overlap
//! - All spans are byte offsets into the scanned text

pub mod classify;
pub mod cursor;
pub mod fences;
pub mod frontmatter;
pub mod headers;
pub mod kinds;
pub mod math;
pub mod nesting;
pub mod snapshot;
pub mod text;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

pub use classify::{classify_marker, scan_container_markers};
pub use fences::scan_code_blocks;
pub use frontmatter::scan_frontmatter;
pub use headers::scan_headers;
pub use math::scan_math;
pub use nesting::{Nesting, NestingMatcher, match_markers};
pub use text::Span;
pub use types::{
    CodeBlock, ContainerMarker, HeaderSpan, MatchedPair, MathKind, MathSpan, UnmatchedMarker,
    UnmatchedReason,
};

/// Knobs that change scanning behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Skip `$$...$$` regions during the inline math pass so a `$x$` inside
    /// display math is not reported twice.
    pub mask_display_math: bool,
}

/// Everything recovered from one scan of one text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Scan {
    pub frontmatter: Option<Span>,
    pub headers: Vec<HeaderSpan>,
    pub code_blocks: Vec<CodeBlock>,
    pub markers: Vec<ContainerMarker>,
    pub nesting: Nesting,
    pub math: Vec<MathSpan>,
}

impl Scan {
    /// Interactive (dispatchable) code blocks only.
    pub fn interactive_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.code_blocks.iter().filter(|b| b.interactive)
    }
}

/// Scans `text` with default options.
pub fn scan_document(text: &str) -> Scan {
    scan_document_with(text, ScanOptions::default())
}

pub fn scan_document_with(text: &str, options: ScanOptions) -> Scan {
    let markers = scan_container_markers(text);
    let nesting = match_markers(markers.iter().copied());

    let scan = Scan {
        frontmatter: scan_frontmatter(text),
        headers: scan_headers(text),
        code_blocks: scan_code_blocks(text),
        markers,
        nesting,
        math: scan_math(text, options.mask_display_math),
    };

    log::debug!(
        "scanned {} bytes: {} code blocks, {} container pairs ({} unmatched), {} math spans, {} headers",
        text.len(),
        scan.code_blocks.len(),
        scan.nesting.pairs.len(),
        scan.nesting.unmatched.len(),
        scan.math.len(),
        scan.headers.len()
    );
    scan
}
