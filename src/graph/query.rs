//! Adjacency queries over a [`RepoGraph`].

use std::collections::HashSet;

use serde::Serialize;

use super::RepoGraph;
use crate::error::{Error, Result};

/// Parents, children, and siblings of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Neighbors {
    /// Ids of nodes that contain the node.
    pub parents: Vec<String>,
    /// Ids of nodes the node contains.
    pub children: Vec<String>,
    /// Other children of the node's parents.
    pub siblings: Vec<String>,
}

impl RepoGraph {
    /// Ids contained by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    pub fn children(&self, id: &str) -> Result<&[String]> {
        self.require(id)?;
        Ok(self.children.get(id).map(Vec::as_slice).unwrap_or_default())
    }

    /// Ids containing `id`.
    ///
    /// A well-formed path hierarchy gives at most one, but nothing here
    /// relies on that.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    pub fn parents(&self, id: &str) -> Result<&[String]> {
        self.require(id)?;
        Ok(self.parents.get(id).map(Vec::as_slice).unwrap_or_default())
    }

    /// Union of the children of every parent of `id`, excluding `id`.
    ///
    /// A node without parents has no siblings, including top-level nodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    pub fn siblings(&self, id: &str) -> Result<Vec<String>> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut siblings: Vec<String> = Vec::new();
        for parent in self.parents(id)? {
            for child in self.children.get(parent).into_iter().flatten() {
                if child != id && seen.insert(child) {
                    siblings.push(child.clone());
                }
            }
        }
        Ok(siblings)
    }

    /// All three relationships of `id` at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    pub fn neighbors(&self, id: &str) -> Result<Neighbors> {
        Ok(Neighbors {
            parents: self.parents(id)?.to_vec(),
            children: self.children(id)?.to_vec(),
            siblings: self.siblings(id)?,
        })
    }

    fn require(&self, id: &str) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownNode(id.to_string()))
        }
    }
}
