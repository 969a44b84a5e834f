//! Service context bundling the port trait objects.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::live::{client_for, GitHubClient};
use crate::adapters::recording::{RecordingLlmClient, RecordingSourceControl};
use crate::adapters::replaying::{ReplayingLlmClient, ReplayingSourceControl};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::commits::Commit;
use crate::config::Config;
use crate::error::Result;
use crate::ports::llm::{CompletionRequest, CompletionResponse, LlmClient};
use crate::ports::source_control::{SourceControl, TreeListing};
use crate::ports::PortFuture;
use crate::repository::RepoRef;

/// Bundles the port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying); everything downstream only sees the traits.
pub struct ServiceContext {
    /// Source-control provider for trees and commit history.
    pub source: Box<dyn SourceControl>,
    /// LLM client for chat answers.
    pub llm: Box<dyn LlmClient>,
}

impl ServiceContext {
    /// Creates a live context talking to the configured services.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self {
            source: Box::new(GitHubClient::from_config(&config.github)),
            llm: client_for(&config.llm),
        }
    }

    /// Creates a live context whose interactions are also recorded.
    ///
    /// Cassettes land in a timestamped directory under `dir` once the
    /// returned session is finished. Drop the context first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Cassette`] if the session directory
    /// cannot be created.
    pub fn recording_at(
        config: &Config,
        dir: impl Into<PathBuf>,
        repository: &str,
    ) -> Result<(Self, RecordingSession)> {
        let session = RecordingSession::new(dir, repository)?;
        let live = Self::live(config);
        let ctx = Self {
            source: Box::new(RecordingSourceControl::new(live.source, Arc::clone(&session.source))),
            llm: Box::new(RecordingLlmClient::new(live.llm, Arc::clone(&session.llm))),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Each port gets its own replayer over the same cassette, so per-port
    /// cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Cassette`] if the file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self> {
        Self::replaying_from(&CassetteConfig::monolithic(path))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette use a panicking adapter that
    /// fails with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Cassette`] if any configured file
    /// cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self> {
        let replayers = config.load_all()?;
        Ok(Self::from_replayers(replayers.source, replayers.llm))
    }

    /// Creates a replaying context from already loaded replayers.
    #[must_use]
    pub fn from_replayers(
        source: Option<CassetteReplayer>,
        llm: Option<CassetteReplayer>,
    ) -> Self {
        Self {
            source: match source {
                Some(r) => Box::new(ReplayingSourceControl::new(r)),
                None => Box::new(PanickingSourceControl),
            },
            llm: match llm {
                Some(r) => Box::new(ReplayingLlmClient::new(r)),
                None => Box::new(PanickingLlmClient),
            },
        }
    }
}

// --- Panicking adapters for unconfigured ports ---

const SOURCE_NOT_CONFIGURED: &str =
    "SourceControl port not configured in CassetteConfig: no cassette loaded for source";

struct PanickingSourceControl;
impl SourceControl for PanickingSourceControl {
    fn default_branch<'a>(&'a self, _repo: &'a RepoRef) -> PortFuture<'a, String> {
        panic!("{SOURCE_NOT_CONFIGURED}");
    }
    fn tree<'a>(&'a self, _repo: &'a RepoRef, _branch: &'a str) -> PortFuture<'a, TreeListing> {
        panic!("{SOURCE_NOT_CONFIGURED}");
    }
    fn list_commits<'a>(
        &'a self,
        _repo: &'a RepoRef,
        _per_page: u32,
    ) -> PortFuture<'a, Vec<String>> {
        panic!("{SOURCE_NOT_CONFIGURED}");
    }
    fn commit_detail<'a>(&'a self, _repo: &'a RepoRef, _sha: &'a str) -> PortFuture<'a, Commit> {
        panic!("{SOURCE_NOT_CONFIGURED}");
    }
}

struct PanickingLlmClient;
impl LlmClient for PanickingLlmClient {
    fn complete<'a>(&'a self, _request: &'a CompletionRequest) -> PortFuture<'a, CompletionResponse> {
        panic!("LlmClient port not configured in CassetteConfig: no cassette loaded for llm");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            repository: "o/r".into(),
            interactions,
        };
        std::fs::write(path, cassette.to_yaml().unwrap()).unwrap();
    }

    fn branch_interaction() -> Interaction {
        Interaction {
            seq: 0,
            port: "source".into(),
            method: "default_branch".into(),
            input: json!({"repo": {"owner": "o", "name": "r"}}),
            output: json!({"Ok": "main"}),
        }
    }

    #[tokio::test]
    async fn replaying_context_from_monolithic_cassette() {
        let dir = std::env::temp_dir().join("sahayatri_ctx_test_mono");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("full.cassette.yaml");
        write_cassette(
            &path,
            vec![
                branch_interaction(),
                Interaction {
                    seq: 1,
                    port: "llm".into(),
                    method: "complete".into(),
                    input: json!({}),
                    output: json!({"Ok": {"text": "hi", "prompt_tokens": 1, "completion_tokens": 1}}),
                },
            ],
        );

        let ctx = ServiceContext::replaying(&path).unwrap();
        let branch = ctx.source.default_branch(&RepoRef::new("o", "r")).await.unwrap();
        assert_eq!(branch, "main");

        let request = CompletionRequest {
            model: "m".into(),
            system: String::new(),
            prompt: "q".into(),
            max_tokens: 1,
        };
        assert_eq!(ctx.llm.complete(&request).await.unwrap().text, "hi");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn replaying_from_per_port_cassettes() {
        let dir = std::env::temp_dir().join("sahayatri_ctx_test_ports");
        std::fs::create_dir_all(&dir).unwrap();
        let source_path = dir.join("source.cassette.yaml");
        write_cassette(&source_path, vec![branch_interaction()]);

        let config = CassetteConfig { source: Some(source_path), llm: None };
        let ctx = ServiceContext::replaying_from(&config).unwrap();
        let branch = ctx.source.default_branch(&RepoRef::new("o", "r")).await.unwrap();
        assert_eq!(branch, "main");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    #[should_panic(expected = "not configured in CassetteConfig")]
    fn unspecified_port_panics_with_clear_message() {
        let ctx = ServiceContext::from_replayers(None, None);
        let request = CompletionRequest {
            model: "m".into(),
            system: String::new(),
            prompt: "q".into(),
            max_tokens: 1,
        };
        let _ = ctx.llm.complete(&request);
    }

    #[test]
    fn recording_context_creates_session_directory() {
        let base = std::env::temp_dir().join("sahayatri_ctx_test_record");
        let _ = std::fs::remove_dir_all(&base);

        let (ctx, session) = ServiceContext::recording_at(&Config::default(), &base, "o/r").unwrap();
        assert!(session.output_dir().starts_with(&base));
        drop(ctx);
        let dir = session.finish().unwrap();
        assert!(dir.join("source.cassette.yaml").exists());

        let _ = std::fs::remove_dir_all(&base);
    }
}
