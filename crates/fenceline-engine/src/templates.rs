//! Snippets an editor inserts for new blocks.

use crate::parsing::Scan;
use crate::parsing::kinds::{CodeFence, ContainerFence};

/// Text to insert plus where the caret goes, as a byte offset into `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub text: String,
    pub cursor: usize,
}

/// An interactive code block with an empty body line.
pub fn code_block(language: &str) -> Insertion {
    let fence = CodeFence::TICK.to_string().repeat(CodeFence::MIN_RUN);
    let opener = format!("{fence}{{{language}}}\n");
    Insertion {
        cursor: opener.len(),
        text: format!("{opener}\n{fence}\n"),
    }
}

pub fn style_block() -> Insertion {
    let opener = "<style>\n";
    Insertion {
        text: format!("{opener}\n</style>\n"),
        cursor: opener.len(),
    }
}

/// A container div with the given classes.
///
/// `classes` is whitespace separated; a leading `.` on each class is optional.
/// Weights below the minimum marker weight are raised to it.
pub fn div(classes: &str, weight: usize) -> Insertion {
    let weight = weight.max(ContainerFence::MIN_WEIGHT);
    let marker = ContainerFence::COLON.to_string().repeat(weight);
    let classes = classes
        .split_whitespace()
        .map(|c| c.trim_start_matches('.'))
        .collect::<Vec<_>>()
        .join(" .");
    let opener = format!("{marker} {{.{classes}}}\n");
    Insertion {
        cursor: opener.len(),
        text: format!("{opener}\n{marker}\n"),
    }
}

/// Weight for a new div at `offset`: one more than the innermost matched
/// container around it, or the minimum weight outside any container.
pub fn div_weight_at(scan: &Scan, offset: usize) -> usize {
    scan.nesting
        .pairs
        .iter()
        .filter(|p| p.span().contains_inclusive(offset))
        .max_by_key(|p| p.depth)
        .map_or(ContainerFence::MIN_WEIGHT, |p| p.weight + 1)
}
