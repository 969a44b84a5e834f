//! Recording adapter for the `SourceControl` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::adapters::inputs;
use crate::cassette::recorder::CassetteRecorder;
use crate::commits::Commit;
use crate::ports::source_control::{SourceControl, TreeListing};
use crate::ports::PortFuture;
use crate::repository::RepoRef;

/// Records source-control interactions while delegating to an inner implementation.
pub struct RecordingSourceControl {
    inner: Box<dyn SourceControl>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSourceControl {
    /// Creates a recording client wrapping `inner`.
    pub fn new(inner: Box<dyn SourceControl>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl SourceControl for RecordingSourceControl {
    fn default_branch<'a>(&'a self, repo: &'a RepoRef) -> PortFuture<'a, String> {
        Box::pin(async move {
            let result = self.inner.default_branch(repo).await;
            record_result(&self.recorder, "source", "default_branch", inputs::repo(repo), &result);
            result
        })
    }

    fn tree<'a>(&'a self, repo: &'a RepoRef, branch: &'a str) -> PortFuture<'a, TreeListing> {
        Box::pin(async move {
            let result = self.inner.tree(repo, branch).await;
            record_result(&self.recorder, "source", "tree", inputs::tree(repo, branch), &result);
            result
        })
    }

    fn list_commits<'a>(
        &'a self,
        repo: &'a RepoRef,
        per_page: u32,
    ) -> PortFuture<'a, Vec<String>> {
        Box::pin(async move {
            let result = self.inner.list_commits(repo, per_page).await;
            let input = inputs::list_commits(repo, per_page);
            record_result(&self.recorder, "source", "list_commits", input, &result);
            result
        })
    }

    fn commit_detail<'a>(&'a self, repo: &'a RepoRef, sha: &'a str) -> PortFuture<'a, Commit> {
        Box::pin(async move {
            let result = self.inner.commit_detail(repo, sha).await;
            let input = inputs::commit_detail(repo, sha);
            record_result(&self.recorder, "source", "commit_detail", input, &result);
            result
        })
    }
}
