//! `sahayatri suggest` command.

use super::fetch_graph;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::graph::suggest_paths;

/// Execute the `suggest` command.
///
/// # Errors
///
/// Returns any fetch error.
pub async fn run(ctx: &ServiceContext, config: &Config, url: &str, term: &str) -> Result<()> {
    let (_, graph) = fetch_graph(ctx, config, url).await?;
    let suggestions = suggest_paths(&graph, term);
    if suggestions.is_empty() {
        println!("No paths match '{term}'.");
    }
    for path in suggestions {
        println!("{path}");
    }
    Ok(())
}
