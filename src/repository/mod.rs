//! Fetch pipeline: repository URL to graph and commit history.
//!
//! Both pipelines read through [`ServiceContext`] ports and build fresh
//! values; nothing is applied unless the whole load succeeds.

pub mod url;

use std::fmt;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commits::Commit;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::graph::{decompose, RepoGraph};

pub use url::{parse_repo_url, INVALID_URL_MESSAGE};

/// Owner and name of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    /// Account or organization that owns the repository.
    pub owner: String,
    /// Repository name without any `.git` suffix.
    pub name: String,
}

impl RepoRef {
    /// Creates a reference to `owner/name`.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self { owner: owner.into(), name: name.into() }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything one successful load produces.
#[derive(Debug, Clone)]
pub struct RepositoryData {
    /// The repository that was loaded.
    pub repo: RepoRef,
    /// Graph of the default branch's tree.
    pub graph: RepoGraph,
    /// Recent commits with file details, newest first.
    pub commits: Vec<Commit>,
}

/// Fetches the default branch's tree and decomposes it into a graph.
///
/// # Errors
///
/// Returns [`Error::TruncatedRepository`] if the provider cut the listing
/// short, [`Error::EmptyRepository`] if it has no entries, or any error
/// from the source-control port.
pub async fn fetch_repository_data(ctx: &ServiceContext, repo: &RepoRef) -> Result<RepoGraph> {
    let branch = ctx.source.default_branch(repo).await?;
    debug!(%repo, %branch, "fetching tree");

    let listing = ctx.source.tree(repo, &branch).await?;
    if listing.truncated {
        return Err(Error::TruncatedRepository);
    }

    let graph = decompose(&listing.entries)?;
    info!(
        %repo,
        files = graph.file_count(),
        directories = graph.directory_count(),
        edges = graph.edges().len(),
        "repository graph built"
    );
    Ok(graph)
}

/// Fetches one page of commits, then every commit's detail concurrently.
///
/// # Errors
///
/// Fails as a whole if the listing or any single detail request fails.
pub async fn fetch_commits(
    ctx: &ServiceContext,
    repo: &RepoRef,
    per_page: u32,
) -> Result<Vec<Commit>> {
    let shas = ctx.source.list_commits(repo, per_page).await?;
    debug!(%repo, count = shas.len(), "fetching commit details");

    let commits = try_join_all(shas.iter().map(|sha| ctx.source.commit_detail(repo, sha))).await?;
    info!(%repo, commits = commits.len(), "commit history fetched");
    Ok(commits)
}

/// Parses `url` and runs both pipelines together.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] before any request if the URL is not a
/// repository on the configured host; otherwise the first failure of
/// either pipeline.
pub async fn load(ctx: &ServiceContext, url: &str, config: &Config) -> Result<RepositoryData> {
    let repo = parse_repo_url(url, &config.github.host)?;
    let (graph, commits) = tokio::try_join!(
        fetch_repository_data(ctx, &repo),
        fetch_commits(ctx, &repo, config.github.commit_page_size),
    )?;
    Ok(RepositoryData { repo, graph, commits })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::cassette::replayer::CassetteReplayer;
    use chrono::Utc;
    use serde_json::json;

    fn repo_input() -> serde_json::Value {
        json!({"repo": {"owner": "o", "name": "r"}})
    }

    fn interaction(method: &str, input: serde_json::Value, output: serde_json::Value) -> Interaction {
        Interaction { seq: 0, port: "source".into(), method: method.into(), input, output }
    }

    fn commit_json(sha: &str, login: &str, path: &str) -> serde_json::Value {
        json!({"Ok": {
            "sha": sha,
            "message": format!("commit {sha}"),
            "author": {"login": login, "avatar_url": "https://example.com/a.png"},
            "timestamp": "2024-01-02T03:04:05Z",
            "files": [{"path": path, "status": "modified", "additions": 1, "deletions": 0}]
        }})
    }

    fn context(interactions: Vec<Interaction>) -> ServiceContext {
        let cassette = Cassette {
            name: "repository-test".into(),
            recorded_at: Utc::now(),
            repository: "o/r".into(),
            interactions,
        };
        ServiceContext::from_replayers(Some(CassetteReplayer::new(&cassette)), None)
    }

    fn tree_interactions(truncated: bool) -> Vec<Interaction> {
        vec![
            interaction("default_branch", repo_input(), json!({"Ok": "main"})),
            interaction(
                "tree",
                json!({"repo": {"owner": "o", "name": "r"}, "branch": "main"}),
                json!({"Ok": {
                    "entries": [
                        {"path": "a", "kind": "tree"},
                        {"path": "a/b.ts", "kind": "blob", "size": 10},
                        {"path": "a/c/d.ts", "kind": "blob", "size": 20}
                    ],
                    "truncated": truncated
                }}),
            ),
        ]
    }

    #[tokio::test]
    async fn builds_graph_from_default_branch_tree() {
        let ctx = context(tree_interactions(false));
        let graph = fetch_repository_data(&ctx, &RepoRef::new("o", "r")).await.unwrap();

        assert_eq!(graph.file_count(), 2);
        assert_eq!(graph.directory_count(), 2);
        assert_eq!(graph.edges().len(), 3);
    }

    #[tokio::test]
    async fn truncated_listing_is_rejected() {
        let ctx = context(tree_interactions(true));
        let err = fetch_repository_data(&ctx, &RepoRef::new("o", "r")).await.unwrap_err();
        assert_eq!(err, Error::TruncatedRepository);
    }

    #[tokio::test]
    async fn missing_repository_surfaces_not_found() {
        let ctx = context(vec![interaction(
            "default_branch",
            repo_input(),
            json!({"Err": {"kind": "not_found", "message": "Repository not found."}}),
        )]);
        let err = fetch_repository_data(&ctx, &RepoRef::new("o", "r")).await.unwrap_err();
        assert_eq!(err, Error::NotFound("Repository not found.".into()));
    }

    #[tokio::test]
    async fn commit_details_keep_listing_order() {
        let ctx = context(vec![
            interaction(
                "list_commits",
                json!({"repo": {"owner": "o", "name": "r"}, "per_page": 30}),
                json!({"Ok": ["s1", "s2"]}),
            ),
            // recorded in completion order, which differs from listing order
            interaction(
                "commit_detail",
                json!({"repo": {"owner": "o", "name": "r"}, "sha": "s2"}),
                commit_json("s2", "y", "b"),
            ),
            interaction(
                "commit_detail",
                json!({"repo": {"owner": "o", "name": "r"}, "sha": "s1"}),
                commit_json("s1", "x", "a"),
            ),
        ]);

        let commits = fetch_commits(&ctx, &RepoRef::new("o", "r"), 30).await.unwrap();
        let shas: Vec<&str> = commits.iter().map(|c| c.sha.as_str()).collect();
        assert_eq!(shas, ["s1", "s2"]);
    }

    #[tokio::test]
    async fn one_failed_detail_fails_the_history() {
        let ctx = context(vec![
            interaction(
                "list_commits",
                json!({"repo": {"owner": "o", "name": "r"}, "per_page": 30}),
                json!({"Ok": ["s1", "s2"]}),
            ),
            interaction(
                "commit_detail",
                json!({"repo": {"owner": "o", "name": "r"}, "sha": "s1"}),
                commit_json("s1", "x", "a"),
            ),
            interaction(
                "commit_detail",
                json!({"repo": {"owner": "o", "name": "r"}, "sha": "s2"}),
                json!({"Err": {"kind": "external_service", "message": "boom"}}),
            ),
        ]);

        let err = fetch_commits(&ctx, &RepoRef::new("o", "r"), 30).await.unwrap_err();
        assert_eq!(err, Error::ExternalService("boom".into()));
    }

    #[tokio::test]
    async fn invalid_url_fails_before_any_request() {
        // no interactions: any port call would panic
        let ctx = context(vec![]);
        let err = load(&ctx, "https://example.org/o/r", &Config::default()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn load_fails_whole_when_tree_is_truncated() {
        let mut interactions = tree_interactions(true);
        interactions.push(interaction(
            "list_commits",
            json!({"repo": {"owner": "o", "name": "r"}, "per_page": 30}),
            json!({"Ok": []}),
        ));
        let ctx = context(interactions);

        let err = load(&ctx, "https://github.com/o/r", &Config::default()).await.unwrap_err();
        assert_eq!(err, Error::TruncatedRepository);
    }

    #[tokio::test]
    async fn load_combines_graph_and_commits() {
        let mut interactions = tree_interactions(false);
        interactions.push(interaction(
            "list_commits",
            json!({"repo": {"owner": "o", "name": "r"}, "per_page": 30}),
            json!({"Ok": ["s1"]}),
        ));
        interactions.push(interaction(
            "commit_detail",
            json!({"repo": {"owner": "o", "name": "r"}, "sha": "s1"}),
            commit_json("s1", "x", "a/b.ts"),
        ));
        let ctx = context(interactions);

        let data = load(&ctx, "https://github.com/o/r.git", &Config::default()).await.unwrap();
        assert_eq!(data.repo, RepoRef::new("o", "r"));
        assert_eq!(data.graph.file_count(), 2);
        assert_eq!(data.commits.len(), 1);
    }
}
