//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `sahayatri`.
#[derive(Debug, Parser)]
#[command(
    name = "sahayatri",
    version,
    about = "Explore a GitHub repository's structure and history, and ask questions about it"
)]
pub struct Cli {
    /// Log debug detail to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// YAML configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize the repository graph.
    Graph {
        /// Repository URL, such as `https://github.com/owner/repo`.
        url: String,
        /// Print nodes and edges as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show a node's parents, children, and siblings.
    Node {
        /// Repository URL.
        url: String,
        /// Node id (its full path).
        id: String,
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Suggest paths containing a search term.
    Suggest {
        /// Repository URL.
        url: String,
        /// Case-insensitive search term.
        term: String,
    },
    /// List recent commits grouped by author.
    Commits {
        /// Repository URL.
        url: String,
        /// Keep commits touching a path containing this text.
        #[arg(long)]
        path: Option<String>,
        /// Keep commits whose author login contains this text.
        #[arg(long)]
        author: Option<String>,
        /// Keep commits changing a file with this suffix, such as `.rs`.
        #[arg(long)]
        suffix: Option<String>,
    },
    /// Ask one question about the repository structure.
    Ask {
        /// Repository URL.
        url: String,
        /// The question.
        question: String,
        /// Node to focus the answer on.
        #[arg(long, value_name = "ID")]
        node: Option<String>,
    },
    /// Chat interactively about the repository.
    Chat {
        /// Repository URL.
        url: String,
    },
}

impl Command {
    /// Repository URL the command operates on.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Graph { url, .. }
            | Self::Node { url, .. }
            | Self::Suggest { url, .. }
            | Self::Commits { url, .. }
            | Self::Ask { url, .. }
            | Self::Chat { url } => url,
        }
    }
}
