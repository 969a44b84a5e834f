//! `sahayatri node` command.

use std::fmt::Write as _;

use serde::Serialize;

use super::{fetch_graph, to_json};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::graph::{Neighbors, Node, RepoGraph};

#[derive(Serialize)]
struct NodeReport<'a> {
    node: &'a Node,
    #[serde(flatten)]
    neighbors: Neighbors,
}

/// Execute the `node` command.
///
/// # Errors
///
/// Returns any fetch error, or [`Error::UnknownNode`] if `id` is not in
/// the repository.
pub async fn run(
    ctx: &ServiceContext,
    config: &Config,
    url: &str,
    id: &str,
    json: bool,
) -> Result<()> {
    let (_, graph) = fetch_graph(ctx, config, url).await?;
    let node = graph.node(id).ok_or_else(|| Error::UnknownNode(id.to_string()))?;
    let neighbors = graph.neighbors(id)?;

    if json {
        println!("{}", to_json(&NodeReport { node, neighbors })?);
    } else {
        print!("{}", render(&graph, node, &neighbors));
    }
    Ok(())
}

fn render(graph: &RepoGraph, node: &Node, neighbors: &Neighbors) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", node.id, node.kind);
    if let Some(language) = node.language {
        let _ = writeln!(out, "Language: {language}");
    }
    if let Some(size) = node.size {
        let _ = writeln!(out, "Size: {size} bytes");
    }
    for (label, ids) in [
        ("Parents", &neighbors.parents),
        ("Children", &neighbors.children),
        ("Siblings", &neighbors.siblings),
    ] {
        let _ = writeln!(out, "{label}: {}", list_or_none(graph, ids));
    }
    out
}

fn list_or_none(graph: &RepoGraph, ids: &[String]) -> String {
    if ids.is_empty() {
        return "(none)".to_string();
    }
    ids.iter()
        .map(|id| match graph.node(id) {
            Some(node) if node.kind == crate::graph::NodeKind::Directory => format!("{id}/"),
            _ => id.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
