//! Turns a flat tree listing into directory/file nodes and containment edges.

use std::collections::HashSet;

use super::{Edge, Entry, EntryKind, Node, RepoGraph};
use crate::error::{Error, Result};

/// Derives the repository graph from a tree listing.
///
/// Every proper prefix of every path becomes a directory node, whether or
/// not the provider listed it. Blobs become file nodes; listed trees become
/// directory nodes. Each adjacent pair of prefixes yields one edge from the
/// shorter to the longer.
///
/// # Errors
///
/// Returns [`Error::EmptyRepository`] when `entries` is empty or contains
/// no usable path.
pub fn decompose(entries: &[Entry]) -> Result<RepoGraph> {
    if entries.is_empty() {
        return Err(Error::EmptyRepository);
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut directories = Vec::new();
    let mut files = Vec::new();
    let mut edges = Vec::new();

    for entry in entries {
        let prefixes = prefixes(&entry.path);
        let Some((leaf, ancestors)) = prefixes.split_last() else {
            continue;
        };

        for dir in ancestors {
            if seen.insert(dir.clone()) {
                directories.push(Node::directory(dir));
            }
        }

        if seen.insert(leaf.clone()) {
            match entry.kind {
                EntryKind::Blob => files.push(Node::file(leaf, entry.size)),
                EntryKind::Tree => directories.push(Node::directory(leaf)),
            }
        }

        edges.extend(prefixes.windows(2).map(|pair| Edge::new(&pair[0], &pair[1])));
    }

    if directories.is_empty() && files.is_empty() {
        return Err(Error::EmptyRepository);
    }

    directories.extend(files);
    Ok(RepoGraph::new(directories, edges))
}

/// All non-empty prefixes of a path's segment list, shortest first.
///
/// Empty segments (leading, trailing, or doubled slashes) are ignored.
fn prefixes(path: &str) -> Vec<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    (1..=segments.len()).map(|len| segments[..len].join("/")).collect()
}
