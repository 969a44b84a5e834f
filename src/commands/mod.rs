//! Command dispatch and handlers.

pub mod ask;
pub mod chat;
pub mod commits;
pub mod graph;
pub mod node;
pub mod suggest;

use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::graph::RepoGraph;
use crate::repository::{fetch_repository_data, parse_repo_url, RepoRef};

/// Dispatch a parsed command to its handler.
///
/// When `SAHAYATRI_RECORD` is set to a directory path, all port
/// interactions are recorded to per-port cassette files in a new
/// subdirectory. When `SAHAYATRI_REPLAY` names a cassette file or a
/// recorded session directory, every port is served from it instead of
/// the network.
///
/// # Errors
///
/// Returns an error string if configuration, the context, or the selected
/// command handler fails.
pub fn dispatch(cli: &Cli) -> std::result::Result<(), String> {
    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    let (ctx, session) = build_context(&cli.command, &config).map_err(|e| e.to_string())?;

    let result = runtime.block_on(dispatch_with_context(&cli.command, &ctx, &config));

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result.map_err(|e| e.to_string())
}

fn build_context(
    command: &Command,
    config: &Config,
) -> Result<(ServiceContext, Option<RecordingSession>)> {
    if let Ok(path) = env::var("SAHAYATRI_REPLAY") {
        debug!(%path, "replaying cassettes");
        return Ok((replay_context(Path::new(&path))?, None));
    }
    if let Ok(dir) = env::var("SAHAYATRI_RECORD") {
        let repository = parse_repo_url(command.url(), &config.github.host)
            .map_or_else(|_| "unknown".to_string(), |repo| repo.to_string());
        let (ctx, session) = ServiceContext::recording_at(config, PathBuf::from(dir), &repository)?;
        return Ok((ctx, Some(session)));
    }
    Ok((ServiceContext::live(config), None))
}

/// A directory is a recorded session; anything else a monolithic cassette.
fn replay_context(path: &Path) -> Result<ServiceContext> {
    if path.is_dir() {
        ServiceContext::replaying_from(&CassetteConfig::session_dir(path))
    } else {
        ServiceContext::replaying(path)
    }
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
) -> Result<()> {
    match command {
        Command::Graph { url, json } => graph::run(ctx, config, url, *json).await,
        Command::Node { url, id, json } => node::run(ctx, config, url, id, *json).await,
        Command::Suggest { url, term } => suggest::run(ctx, config, url, term).await,
        Command::Commits { url, path, author, suffix } => {
            let filters = commits::Filters {
                path: path.clone().unwrap_or_default(),
                author: author.clone().unwrap_or_default(),
                suffix: suffix.clone().unwrap_or_default(),
            };
            commits::run(ctx, config, url, &filters).await
        }
        Command::Ask { url, question, node } => {
            ask::run(ctx, config, url, question, node.as_deref()).await
        }
        Command::Chat { url } => chat::run(ctx, config, url).await,
    }
}

/// Parses `url` and fetches only the repository graph.
async fn fetch_graph(
    ctx: &ServiceContext,
    config: &Config,
    url: &str,
) -> Result<(RepoRef, RepoGraph)> {
    let repo = parse_repo_url(url, &config.github.host)?;
    let graph = fetch_repository_data(ctx, &repo).await?;
    Ok((repo, graph))
}

/// Pretty JSON for `--json` output.
fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Output(e.to_string()))
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> std::result::Result<(), String> {
    let output_dir = session.finish().map_err(|e| e.to_string())?;
    info!(dir = %output_dir.display(), "recording saved");
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
