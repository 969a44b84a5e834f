//! Source-control provider port: tree listings and commit history.

use serde::{Deserialize, Serialize};

use super::PortFuture;
use crate::commits::Commit;
use crate::graph::Entry;
use crate::repository::RepoRef;

/// A recursive tree listing for one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeListing {
    /// Every blob and tree in the branch.
    pub entries: Vec<Entry>,
    /// Set by the provider when the listing was cut short.
    pub truncated: bool,
}

/// Read-only access to a hosted repository.
pub trait SourceControl: Send + Sync {
    /// Name of the repository's default branch.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::NotFound`] for a missing repository,
    /// [`crate::error::Error::Auth`] for a rejected credential, or
    /// [`crate::error::Error::ExternalService`] for anything else.
    fn default_branch<'a>(&'a self, repo: &'a RepoRef) -> PortFuture<'a, String>;

    /// Recursive tree listing of `branch`.
    ///
    /// # Errors
    ///
    /// As for [`SourceControl::default_branch`].
    fn tree<'a>(&'a self, repo: &'a RepoRef, branch: &'a str) -> PortFuture<'a, TreeListing>;

    /// Hashes of the most recent `per_page` commits, newest first.
    ///
    /// # Errors
    ///
    /// As for [`SourceControl::default_branch`].
    fn list_commits<'a>(&'a self, repo: &'a RepoRef, per_page: u32)
        -> PortFuture<'a, Vec<String>>;

    /// Full detail of one commit, including changed files.
    ///
    /// # Errors
    ///
    /// As for [`SourceControl::default_branch`].
    fn commit_detail<'a>(&'a self, repo: &'a RepoRef, sha: &'a str) -> PortFuture<'a, Commit>;
}
