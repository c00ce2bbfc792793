use serde::Serialize;

use super::types::{ContainerMarker, MatchedPair, UnmatchedMarker, UnmatchedReason};

/// Result of matching container markers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Nesting {
    /// Matched pairs in the order their closers appear.
    pub pairs: Vec<MatchedPair>,
    /// Stray closers in document order, then unclosed openers in push order.
    pub unmatched: Vec<UnmatchedMarker>,
}

/// One open container on the stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Index into the matcher's marker arena.
    marker: usize,
    depth: usize,
}

/// Stack matcher pairing openers with closers of equal weight.
///
/// Markers are stored once in an arena; the stack holds indices. Matching is
/// strictly LIFO: a closer only ever looks at the top frame. A weight mismatch
/// reports the closer as stray and leaves the stack as it was, so an opener of
/// a different weight is never popped to "make room".
#[derive(Debug, Default)]
pub struct NestingMatcher {
    markers: Vec<ContainerMarker>,
    stack: Vec<Frame>,
    out: Nesting,
}

impl NestingMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth (number of open containers).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, marker: ContainerMarker) {
        let idx = self.markers.len();
        self.markers.push(marker);

        if marker.is_opening {
            let depth = self.depth();
            self.stack.push(Frame { marker: idx, depth });
            return;
        }

        let top = self
            .stack
            .last()
            .copied()
            .filter(|f| self.markers[f.marker].weight == marker.weight);

        match top {
            Some(frame) => {
                self.stack.pop();
                let opener = self.markers[frame.marker];
                self.out.pairs.push(MatchedPair {
                    opener_line: opener.line,
                    closer_line: marker.line,
                    weight: marker.weight,
                    depth: frame.depth,
                });
            }
            None => {
                log::debug!(
                    "stray container closer (weight {}) at {}",
                    marker.weight,
                    marker.line.start
                );
                self.out.unmatched.push(UnmatchedMarker {
                    line: marker.line,
                    weight: marker.weight,
                    reason: UnmatchedReason::StrayCloser,
                });
            }
        }
    }

    pub fn finish(mut self) -> Nesting {
        // EOF flush: whatever is still open was never closed
        for frame in std::mem::take(&mut self.stack) {
            let opener = self.markers[frame.marker];
            log::debug!(
                "unclosed container opener (weight {}) at {}",
                opener.weight,
                opener.line.start
            );
            self.out.unmatched.push(UnmatchedMarker {
                line: opener.line,
                weight: opener.weight,
                reason: UnmatchedReason::UnclosedOpener,
            });
        }
        self.out
    }
}

/// Matches a document-ordered sequence of classified markers.
pub fn match_markers<I>(markers: I) -> Nesting
where
    I: IntoIterator<Item = ContainerMarker>,
{
    let mut matcher = NestingMatcher::new();
    for m in markers {
        matcher.push(m);
    }
    matcher.finish()
}
