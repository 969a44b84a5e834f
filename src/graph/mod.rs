//! Repository graph: directory and file nodes joined by containment edges.
//!
//! The graph is derived wholesale from a flat tree listing by
//! [`decompose`] and never mutated afterwards. Containment is stored as an
//! edge list plus adjacency maps keyed by node id; there are no parent
//! pointers inside nodes.

pub mod decompose;
pub mod language;
pub mod query;
pub mod search;
pub mod selection;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

pub use decompose::decompose;
pub use language::Language;
pub use query::Neighbors;
pub use search::suggest_paths;
pub use selection::Selection;

/// Kind of a raw tree entry as reported by the source-control provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A file.
    Blob,
    /// A directory.
    Tree,
}

/// One raw item of a recursive tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Slash-delimited path, unique within the listing.
    pub path: String,
    /// Whether the entry is a file or a directory.
    pub kind: EntryKind,
    /// Byte size, present for blobs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Entry {
    /// Creates a blob entry.
    pub fn blob(path: impl Into<String>, size: Option<u64>) -> Self {
        Self { path: path.into(), kind: EntryKind::Blob, size }
    }

    /// Creates a tree entry.
    pub fn tree(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: EntryKind::Tree, size: None }
    }
}

/// Kind of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A file.
    File,
    /// A directory, listed or synthesized from a path prefix.
    Directory,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Directory => "directory",
        })
    }
}

/// A file or directory vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Full path; the only stable identity.
    pub id: String,
    /// Last path segment.
    pub name: String,
    /// File or directory.
    pub kind: NodeKind,
    /// Byte size for files, when the provider reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Language derived from the file extension; `None` for directories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl Node {
    /// Creates a directory node for `id`.
    #[must_use]
    pub fn directory(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: display_name(id).to_string(),
            kind: NodeKind::Directory,
            size: None,
            language: None,
        }
    }

    /// Creates a file node for `id`, tagging it with its language.
    #[must_use]
    pub fn file(id: &str, size: Option<u64>) -> Self {
        Self {
            id: id.to_string(),
            name: display_name(id).to_string(),
            kind: NodeKind::File,
            size,
            language: Some(Language::from_path(id)),
        }
    }
}

/// Last `/`-separated segment of a path.
fn display_name(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

/// Directed containment: `from` contains `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge {
    /// Id of the containing directory.
    pub from: String,
    /// Id of the contained node.
    pub to: String,
}

impl Edge {
    /// Creates an edge from `from` to `to`.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}

/// Immutable node and edge sets for one repository, with O(1) id lookup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepoGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip)]
    children: HashMap<String, Vec<String>>,
    #[serde(skip)]
    parents: HashMap<String, Vec<String>>,
}

impl RepoGraph {
    /// Builds a graph from nodes and edges.
    ///
    /// Nodes with a repeated id keep their first occurrence. Duplicate edges
    /// collapse to one, keeping first-appearance order.
    #[must_use]
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut unique_nodes = Vec::with_capacity(nodes.len());
        for node in nodes {
            if !index.contains_key(&node.id) {
                index.insert(node.id.clone(), unique_nodes.len());
                unique_nodes.push(node);
            }
        }

        let mut seen = HashSet::with_capacity(edges.len());
        let mut unique_edges = Vec::with_capacity(edges.len());
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        let mut parents: HashMap<String, Vec<String>> = HashMap::new();
        for edge in edges {
            if seen.insert(edge.clone()) {
                children.entry(edge.from.clone()).or_default().push(edge.to.clone());
                parents.entry(edge.to.clone()).or_default().push(edge.from.clone());
                unique_edges.push(edge);
            }
        }

        Self { nodes: unique_nodes, edges: unique_edges, index, children, parents }
    }

    /// All nodes: directories first, then files, each in first-appearance order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All distinct edges in first-appearance order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Returns `true` if a node with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of file nodes.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.kind == NodeKind::File).count()
    }

    /// Number of directory nodes.
    #[must_use]
    pub fn directory_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Directory).count()
    }

    /// Top-level nodes (ids without `/`).
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| !n.id.contains('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_edges_collapse_to_one() {
        let graph = RepoGraph::new(
            vec![Node::directory("a"), Node::file("a/b.rs", None)],
            vec![Edge::new("a", "a/b.rs"), Edge::new("a", "a/b.rs")],
        );
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.children("a").unwrap(), ["a/b.rs".to_string()]);
    }

    #[test]
    fn repeated_node_ids_keep_first() {
        let graph = RepoGraph::new(vec![Node::directory("a"), Node::file("a", Some(3))], vec![]);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.node("a").unwrap().kind, NodeKind::Directory);
    }

    #[test]
    fn node_names_and_language() {
        let node = Node::file("src/graph/mod.rs", Some(10));
        assert_eq!(node.name, "mod.rs");
        assert_eq!(node.language, Some(Language::Rust));
        assert_eq!(Node::directory("src").name, "src");
    }

    #[test]
    fn edge_displays_with_arrow() {
        assert_eq!(Edge::new("a", "a/c").to_string(), "a → a/c");
    }

    #[test]
    fn entry_kind_uses_provider_names() {
        let entry: Entry = serde_json::from_str(r#"{"path":"x","kind":"tree"}"#).unwrap();
        assert_eq!(entry, Entry::tree("x"));
    }
}
