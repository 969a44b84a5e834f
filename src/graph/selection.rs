//! Node selection and the highlight sets derived from it.

use std::collections::BTreeSet;

use super::{Edge, RepoGraph};
use crate::error::Result;

/// The selected node, if any, and what it highlights.
///
/// Highlighted nodes are the selection's parents and children; highlighted
/// edges are every edge touching it. A selection is a value: toggling
/// returns a new one computed from scratch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<String>,
    highlighted_nodes: BTreeSet<String>,
    highlighted_edges: BTreeSet<Edge>,
}

impl Selection {
    /// The empty selection.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Selects `id`, or clears the selection if `id` is already selected.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::UnknownNode`] if `id` is not in `graph`.
    pub fn toggle(&self, graph: &RepoGraph, id: &str) -> Result<Self> {
        if self.selected.as_deref() == Some(id) {
            return Ok(Self::none());
        }
        Self::of(graph, id)
    }

    /// A fresh selection of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::UnknownNode`] if `id` is not in `graph`.
    pub fn of(graph: &RepoGraph, id: &str) -> Result<Self> {
        let parents = graph.parents(id)?;
        let children = graph.children(id)?;

        let highlighted_nodes = parents.iter().chain(children).cloned().collect();
        let highlighted_edges = parents
            .iter()
            .map(|parent| Edge::new(parent, id))
            .chain(children.iter().map(|child| Edge::new(id, child)))
            .collect();

        Ok(Self { selected: Some(id.to_string()), highlighted_nodes, highlighted_edges })
    }

    /// Id of the selected node.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Parents and children of the selected node.
    #[must_use]
    pub fn highlighted_nodes(&self) -> &BTreeSet<String> {
        &self.highlighted_nodes
    }

    /// Edges touching the selected node.
    #[must_use]
    pub fn highlighted_edges(&self) -> &BTreeSet<Edge> {
        &self.highlighted_edges
    }

    /// Returns `true` when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }
}
