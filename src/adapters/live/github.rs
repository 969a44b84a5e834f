//! Live adapter for the `SourceControl` port using the GitHub REST API.

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::commits::{Author, ChangedFile, Commit, DEFAULT_AVATAR_URL};
use crate::config::GitHubConfig;
use crate::error::{Error, Result};
use crate::graph::Entry;
use crate::ports::source_control::{SourceControl, TreeListing};
use crate::ports::PortFuture;
use crate::repository::RepoRef;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = concat!("sahayatri/", env!("CARGO_PKG_VERSION"));

const REPO_NOT_FOUND: &str = "Repository not found. Please check the URL and try again.";
const CONTENTS_NOT_FOUND: &str = "Repository contents not found. The repository might be empty.";
const COMMITS_NOT_FOUND: &str = "Commit history not found for this repository.";

/// Live source-control client backed by the GitHub REST API.
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Creates a client against `api_url`, authenticating with `token` when given.
    #[must_use]
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        Self { client: Client::new(), api_url: api_url.into(), token }
    }

    /// Creates a client from configuration.
    #[must_use]
    pub fn from_config(config: &GitHubConfig) -> Self {
        Self::new(config.api_url.clone(), config.token.clone())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        not_found: &str,
    ) -> Result<T> {
        let url = format!("{}{path}", self.api_url.trim_end_matches('/'));
        debug!(%url, "GET");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::ExternalService(format!("GitHub API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, not_found));
        }

        response.json::<T>().await.map_err(|e| {
            Error::ExternalService(format!("Invalid response format from GitHub API: {e}"))
        })
    }
}

/// Maps a non-success status to the error a user should see.
fn status_error(status: StatusCode, not_found: &str) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(not_found.to_string()),
        StatusCode::UNAUTHORIZED => Error::auth_failed(),
        _ => Error::ExternalService(format!(
            "GitHub API error: {}",
            status.canonical_reason().unwrap_or("unexpected status")
        )),
    }
}

#[derive(Deserialize)]
struct RepoResponse {
    default_branch: String,
}

#[derive(Deserialize)]
struct TreeResponse {
    tree: Vec<TreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Deserialize)]
struct TreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    size: Option<u64>,
}

#[derive(Deserialize)]
struct CommitRef {
    sha: String,
}

#[derive(Deserialize)]
struct CommitDetail {
    sha: String,
    commit: GitCommit,
    /// Linked account; absent when the author email matches no user.
    author: Option<Account>,
    #[serde(default)]
    files: Vec<FileDetail>,
}

#[derive(Deserialize)]
struct GitCommit {
    message: String,
    author: GitSignature,
}

#[derive(Deserialize)]
struct GitSignature {
    name: String,
    date: DateTime<Utc>,
}

#[derive(Deserialize)]
struct Account {
    login: String,
    avatar_url: String,
}

#[derive(Deserialize)]
struct FileDetail {
    filename: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
}

/// Converts the provider's tree into entries, skipping submodules.
fn into_listing(response: TreeResponse) -> TreeListing {
    let entries = response
        .tree
        .into_iter()
        .filter_map(|item| match item.kind.as_str() {
            "blob" => Some(Entry::blob(item.path, item.size)),
            "tree" => Some(Entry::tree(item.path)),
            other => {
                debug!(path = %item.path, kind = other, "skipping tree item");
                None
            }
        })
        .collect();
    TreeListing { entries, truncated: response.truncated }
}

fn into_commit(detail: CommitDetail) -> Commit {
    let author = match detail.author {
        Some(account) => Author { login: account.login, avatar_url: account.avatar_url },
        None => Author {
            login: detail.commit.author.name,
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
        },
    };
    Commit {
        sha: detail.sha,
        message: detail.commit.message,
        author,
        timestamp: detail.commit.author.date,
        files: detail
            .files
            .into_iter()
            .map(|f| ChangedFile {
                path: f.filename,
                status: f.status,
                additions: f.additions,
                deletions: f.deletions,
            })
            .collect(),
    }
}

impl SourceControl for GitHubClient {
    fn default_branch<'a>(&'a self, repo: &'a RepoRef) -> PortFuture<'a, String> {
        Box::pin(async move {
            let path = format!("/repos/{}/{}", repo.owner, repo.name);
            let response: RepoResponse = self.get(&path, &[], REPO_NOT_FOUND).await?;
            Ok(response.default_branch)
        })
    }

    fn tree<'a>(&'a self, repo: &'a RepoRef, branch: &'a str) -> PortFuture<'a, TreeListing> {
        Box::pin(async move {
            let path = format!("/repos/{}/{}/git/trees/{branch}", repo.owner, repo.name);
            let query = [("recursive", "1".to_string())];
            let response: TreeResponse = self.get(&path, &query, CONTENTS_NOT_FOUND).await?;
            Ok(into_listing(response))
        })
    }

    fn list_commits<'a>(
        &'a self,
        repo: &'a RepoRef,
        per_page: u32,
    ) -> PortFuture<'a, Vec<String>> {
        Box::pin(async move {
            let path = format!("/repos/{}/{}/commits", repo.owner, repo.name);
            let query = [("per_page", per_page.to_string())];
            let refs: Vec<CommitRef> = self.get(&path, &query, COMMITS_NOT_FOUND).await?;
            Ok(refs.into_iter().map(|r| r.sha).collect())
        })
    }

    fn commit_detail<'a>(&'a self, repo: &'a RepoRef, sha: &'a str) -> PortFuture<'a, Commit> {
        Box::pin(async move {
            let path = format!("/repos/{}/{}/commits/{sha}", repo.owner, repo.name);
            let detail: CommitDetail = self.get(&path, &[], COMMITS_NOT_FOUND).await?;
            Ok(into_commit(detail))
        })
    }
}
