//! Map a GitHub repository's file tree and commit history, and chat about
//! its structure.
//!
//! The core is pure: [`graph`] derives a containment graph from a tree
//! listing, [`commits`] groups and filters history, and [`chat::context`]
//! serializes a graph for the language model. Remote services sit behind
//! the [`ports`] traits and are reached through a [`context::ServiceContext`].

pub mod adapters;
pub mod cassette;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod commits;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod ports;
pub mod repository;
pub mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
/// Help and version requests print and succeed.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    init_tracing(cli.verbose);
    commands::dispatch(&cli)
}

/// Logs to stderr. `RUST_LOG` wins over the verbosity flag.
fn init_tracing(verbose: bool) {
    let default = if verbose { "sahayatri=debug" } else { "sahayatri=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // a subscriber may already be installed when run twice in one process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["sahayatri", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_rejects_invalid_url_before_any_request() {
        let result = run(["sahayatri", "graph", "https://example.org/not/github"]);
        let err = result.unwrap_err();
        assert!(err.contains("valid GitHub repository URL"), "{err}");
    }
}
