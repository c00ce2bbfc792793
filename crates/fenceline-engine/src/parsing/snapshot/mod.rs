//! # Snapshot Testing Support
//!
//! Utilities for testing the scanner via snapshot assertions and invariant checks.
//!
//! - **`normalize`**: converts a `Scan` into a stable, serializable `Snap` of
//!   one-line summaries per span, for `insta` snapshot testing
//! - **`invariants`**: runtime checks for scanner correctness (spans in bounds,
//!   document order, non-overlapping code blocks, well-nested pairs)
//!
//! Scanning behaviour is pinned by fixture snapshots rather than a formal
//! grammar: the `.md` fixture and its `.snap` sit side by side in `tests/fixtures/`.

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
