//! `@name` autocompletion for chat input.

use crate::graph::RepoGraph;

/// Upper bound on suggestions for one partial mention.
pub const MAX_MENTIONS: usize = 5;

/// Text typed after the last `@`, or `None` when there is no `@`.
#[must_use]
pub fn partial_mention(input: &str) -> Option<&str> {
    input.rfind('@').map(|at| &input[at + 1..])
}

/// Node names matching the partial mention in `input`.
///
/// A node matches when its name or id contains the partial text,
/// case-insensitively. Names are returned once each, in graph order.
#[must_use]
pub fn suggest_mentions(graph: &RepoGraph, input: &str) -> Vec<String> {
    let Some(partial) = partial_mention(input) else {
        return Vec::new();
    };
    let needle = partial.to_lowercase();
    let mut names: Vec<String> = Vec::new();
    for node in graph.nodes() {
        if names.len() == MAX_MENTIONS {
            break;
        }
        let matches = node.name.to_lowercase().contains(&needle)
            || node.id.to_lowercase().contains(&needle);
        if matches && !names.contains(&node.name) {
            names.push(node.name.clone());
        }
    }
    names
}

/// Replaces the partial mention in `input` with `@suggestion`.
///
/// Input without an `@` is returned unchanged.
#[must_use]
pub fn apply_mention(input: &str, suggestion: &str) -> String {
    match input.rfind('@') {
        Some(at) => format!("{}@{suggestion}", &input[..at]),
        None => input.to_string(),
    }
}
