//! Path suggestions for the commit-history path filter.

use std::collections::HashSet;

use super::RepoGraph;

/// Upper bound on suggestions offered for one search term.
pub const MAX_SUGGESTIONS: usize = 5;

/// Node ids containing `term`, case-insensitively, in graph order.
///
/// An empty term yields no suggestions.
#[must_use]
pub fn suggest_paths(graph: &RepoGraph, term: &str) -> Vec<String> {
    if term.is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    let mut seen = HashSet::new();
    graph
        .nodes()
        .iter()
        .filter(|node| node.id.to_lowercase().contains(&needle))
        .filter(|node| seen.insert(node.id.as_str()))
        .take(MAX_SUGGESTIONS)
        .map(|node| node.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{decompose, Entry};

    #[test]
    fn matches_case_insensitively_and_caps_results() {
        let entries: Vec<Entry> =
            (0..8).map(|i| Entry::blob(format!("Src/mod{i}.rs"), None)).collect();
        let graph = decompose(&entries).unwrap();

        let suggestions = suggest_paths(&graph, "src");
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0], "Src");
        assert_eq!(suggestions[1], "Src/mod0.rs");
    }

    #[test]
    fn empty_term_suggests_nothing() {
        let graph = decompose(&[Entry::blob("a.rs", None)]).unwrap();
        assert!(suggest_paths(&graph, "").is_empty());
    }

    #[test]
    fn no_match_suggests_nothing() {
        let graph = decompose(&[Entry::blob("a/b.rs", None)]).unwrap();
        assert!(suggest_paths(&graph, "zzz").is_empty());
    }
}
