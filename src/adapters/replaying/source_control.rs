//! Replaying adapter for the `SourceControl` port.

use std::sync::Mutex;

use super::replay_result;
use crate::adapters::inputs;
use crate::cassette::replayer::CassetteReplayer;
use crate::commits::Commit;
use crate::ports::source_control::{SourceControl, TreeListing};
use crate::ports::PortFuture;
use crate::repository::RepoRef;

/// Serves recorded source-control responses from a cassette.
///
/// Calls are matched on their input, since concurrent commit-detail
/// requests are recorded in completion order.
pub struct ReplayingSourceControl {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingSourceControl {
    /// Creates a replaying client from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn output(&self, method: &str, input: &serde_json::Value) -> serde_json::Value {
        let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
        replayer.take_matching("source", method, input).output
    }
}

impl SourceControl for ReplayingSourceControl {
    fn default_branch<'a>(&'a self, repo: &'a RepoRef) -> PortFuture<'a, String> {
        let output = self.output("default_branch", &inputs::repo(repo));
        Box::pin(async move { replay_result(output, "source::default_branch") })
    }

    fn tree<'a>(&'a self, repo: &'a RepoRef, branch: &'a str) -> PortFuture<'a, TreeListing> {
        let output = self.output("tree", &inputs::tree(repo, branch));
        Box::pin(async move { replay_result(output, "source::tree") })
    }

    fn list_commits<'a>(
        &'a self,
        repo: &'a RepoRef,
        per_page: u32,
    ) -> PortFuture<'a, Vec<String>> {
        let output = self.output("list_commits", &inputs::list_commits(repo, per_page));
        Box::pin(async move { replay_result(output, "source::list_commits") })
    }

    fn commit_detail<'a>(&'a self, repo: &'a RepoRef, sha: &'a str) -> PortFuture<'a, Commit> {
        let output = self.output("commit_detail", &inputs::commit_detail(repo, sha));
        Box::pin(async move { replay_result(output, "source::commit_detail") })
    }
}
