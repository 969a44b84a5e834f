//! Port adapters: live network clients, cassette recorders, and cassette replayers.

pub mod live;
pub mod recording;
pub mod replaying;

/// Cassette inputs shared by recording and replaying adapters.
///
/// Replay matches on these values, so both sides must build them identically.
pub(crate) mod inputs {
    use serde_json::{json, Value};

    use crate::repository::RepoRef;

    pub(crate) fn repo(repo: &RepoRef) -> Value {
        json!({ "repo": repo })
    }

    pub(crate) fn tree(repo: &RepoRef, branch: &str) -> Value {
        json!({ "repo": repo, "branch": branch })
    }

    pub(crate) fn list_commits(repo: &RepoRef, per_page: u32) -> Value {
        json!({ "repo": repo, "per_page": per_page })
    }

    pub(crate) fn commit_detail(repo: &RepoRef, sha: &str) -> Value {
        json!({ "repo": repo, "sha": sha })
    }
}
