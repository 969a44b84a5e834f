//! `sahayatri graph` command.

use std::collections::HashMap;
use std::fmt::Write as _;

use super::{fetch_graph, to_json};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::graph::{NodeKind, RepoGraph};
use crate::repository::RepoRef;

/// Execute the `graph` command.
///
/// # Errors
///
/// Returns any fetch error, or [`crate::error::Error::Output`] if JSON
/// rendering fails.
pub async fn run(ctx: &ServiceContext, config: &Config, url: &str, json: bool) -> Result<()> {
    let (repo, graph) = fetch_graph(ctx, config, url).await?;
    if json {
        println!("{}", to_json(&graph)?);
    } else {
        print!("{}", render(&repo, &graph));
    }
    Ok(())
}

/// Summary line, language breakdown, and an indented tree.
#[must_use]
pub fn render(repo: &RepoRef, graph: &RepoGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{repo}");
    let _ = writeln!(
        out,
        "{} files, {} directories, {} edges",
        graph.file_count(),
        graph.directory_count(),
        graph.edges().len()
    );

    let languages = language_counts(graph);
    if !languages.is_empty() {
        let list: Vec<String> =
            languages.iter().map(|(name, count)| format!("{name} ({count})")).collect();
        let _ = writeln!(out, "Languages: {}", list.join(", "));
    }

    out.push('\n');
    for root in graph.roots() {
        render_subtree(graph, &root.id, 0, &mut out);
    }
    out
}

/// File counts per language, most common first, then by name.
fn language_counts(graph: &RepoGraph) -> Vec<(&'static str, usize)> {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for language in graph.nodes().iter().filter_map(|n| n.language) {
        *counts.entry(language.name()).or_default() += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    counts
}

fn render_subtree(graph: &RepoGraph, id: &str, depth: usize, out: &mut String) {
    let Some(node) = graph.node(id) else { return };
    let slash = if node.kind == NodeKind::Directory { "/" } else { "" };
    let _ = writeln!(out, "{}{}{slash}", "  ".repeat(depth), node.name);
    for child in graph.children(id).unwrap_or_default() {
        render_subtree(graph, child, depth + 1, out);
    }
}
