//! Immutable view state for one loaded repository.
//!
//! A [`Snapshot`] is never mutated. Every [`Action`] produces a new
//! snapshot that shares the fetched graph and commits, so a failed action
//! leaves the previous snapshot untouched. Loading another repository
//! replaces the snapshot wholesale.

use std::sync::Arc;

use crate::commits::{filter_by_path, group_by_author, AuthorGroup, Commit};
use crate::error::Result;
use crate::graph::{RepoGraph, Selection};
use crate::repository::{RepoRef, RepositoryData};

/// A user action against the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Toggle selection of a node.
    SelectNode(String),
    /// Drop any selection.
    ClearSelection,
    /// Show only commits touching paths containing the substring; empty shows all.
    FilterByPath(String),
}

/// Everything the user currently sees.
#[derive(Debug, Clone)]
pub struct Snapshot {
    repo: RepoRef,
    graph: Arc<RepoGraph>,
    commits: Arc<[Commit]>,
    groups: Arc<[AuthorGroup]>,
    selection: Selection,
    path_filter: String,
    visible_groups: Vec<AuthorGroup>,
}

impl Snapshot {
    /// Fresh snapshot of a loaded repository: nothing selected, no filter.
    #[must_use]
    pub fn new(data: RepositoryData) -> Self {
        let groups: Arc<[AuthorGroup]> = group_by_author(&data.commits).into();
        Self {
            repo: data.repo,
            graph: Arc::new(data.graph),
            commits: data.commits.into(),
            visible_groups: groups.to_vec(),
            groups,
            selection: Selection::none(),
            path_filter: String::new(),
        }
    }

    /// Returns the snapshot that results from `action`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::UnknownNode`] when selecting an id
    /// that is not in the graph.
    pub fn apply(&self, action: Action) -> Result<Self> {
        match action {
            Action::SelectNode(id) => {
                let selection = self.selection.toggle(&self.graph, &id)?;
                Ok(Self { selection, ..self.clone() })
            }
            Action::ClearSelection => Ok(Self { selection: Selection::none(), ..self.clone() }),
            Action::FilterByPath(substring) => Ok(Self {
                visible_groups: filter_by_path(&self.groups, &substring),
                path_filter: substring,
                ..self.clone()
            }),
        }
    }

    /// The loaded repository.
    #[must_use]
    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    /// The repository graph.
    #[must_use]
    pub fn graph(&self) -> &RepoGraph {
        &self.graph
    }

    /// All fetched commits, newest first.
    #[must_use]
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Active path filter; empty when none.
    #[must_use]
    pub fn path_filter(&self) -> &str {
        &self.path_filter
    }

    /// Author groups after the path filter.
    #[must_use]
    pub fn visible_groups(&self) -> &[AuthorGroup] {
        &self.visible_groups
    }
}
