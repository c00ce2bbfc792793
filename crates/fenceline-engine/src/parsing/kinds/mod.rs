//! # Delimiter Kinds
//!
//! Each structural construct owns its syntax knowledge here: glyphs, minimum
//! run lengths, and the per-line shape checks. Scanners call into these types
//! and never hardcode a backtick, colon, dollar or hash themselves.
//!
//! - **`CodeFence`**: backtick runs, interactive (`{lang}`) vs passive (`lang`) openers
//! - **`ContainerFence`**: colon runs (weight) and the comment-only trailing check
//! - **`Math`**: `$` / `$$` delimiters
//! - **`Header`**: `#` runs followed by a space
//! - **`Frontmatter`**: the `---` delimiter line

pub mod code_fence;
pub mod container;
pub mod frontmatter;
pub mod header;
pub mod math;

pub use code_fence::{CodeFence, FenceSig};
pub use container::ContainerFence;
pub use frontmatter::Frontmatter;
pub use header::Header;
pub use math::Math;
