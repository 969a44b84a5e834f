//! Grounding text for chat requests.

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::graph::RepoGraph;

/// First line of every grounding text.
pub const HEADER: &str = "Repository Structure:";

/// Describes `graph`, and the selected node's neighborhood when there is one.
///
/// One `from → to` line per edge in graph order, then, for a selection,
/// its id, kind, and comma-joined parents, children, and siblings. The
/// output depends only on the inputs.
///
/// # Errors
///
/// Returns [`Error::UnknownNode`] if `selected` is not in `graph`.
pub fn serialize(graph: &RepoGraph, selected: Option<&str>) -> Result<String> {
    let mut text = String::with_capacity(graph.edges().len() * 32 + HEADER.len() + 1);
    text.push_str(HEADER);
    text.push('\n');
    for edge in graph.edges() {
        // writing to a String cannot fail
        let _ = writeln!(text, "{edge}");
    }

    if let Some(id) = selected {
        let node = graph.node(id).ok_or_else(|| Error::UnknownNode(id.to_string()))?;
        let neighbors = graph.neighbors(id)?;
        let _ = write!(
            text,
            "\nSelected File: {}\nType: {}\nParents: {}\nChildren: {}\nSiblings: {}",
            node.id,
            node.kind,
            neighbors.parents.join(", "),
            neighbors.children.join(", "),
            neighbors.siblings.join(", "),
        );
    }
    Ok(text)
}
