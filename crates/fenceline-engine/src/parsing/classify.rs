use super::{
    kinds::ContainerFence,
    text::{LineRef, lines_with_spans},
    types::ContainerMarker,
};

/// Decides opener vs closer for a marker line's trailing content.
///
/// Opener iff the trimmed trailing text is non-empty and is not a lone
/// `<!-- ... -->` comment. A comment annotates a closing fence; a class list
/// or attribute block starts a new container.
pub fn is_opening(trailing: &str) -> bool {
    let t = trailing.trim();
    !t.is_empty() && !ContainerFence::is_comment_only(t)
}

/// Classifies a single line; `None` if it is not a container marker.
///
/// Depends only on the line itself, never on neighbouring lines.
pub fn classify_marker(line: &LineRef<'_>) -> Option<ContainerMarker> {
    let (weight, trailing) = ContainerFence::sig(line.text)?;
    Some(ContainerMarker {
        line: line.content,
        weight,
        is_opening: is_opening(trailing),
    })
}

/// Finds and classifies every container marker line in document order.
pub fn scan_container_markers(text: &str) -> Vec<ContainerMarker> {
    lines_with_spans(text)
        .filter_map(|line| classify_marker(&line))
        .collect()
}
