//! `sahayatri commits` command.

use std::fmt::Write as _;

use crate::commits::{filter_by_path, group_by_author, AuthorGroup, Commit, CommitFilter};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::repository::{fetch_commits, parse_repo_url};

/// Filters from the command line; empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    /// Changed-path substring, case-insensitive.
    pub path: String,
    /// Author login substring.
    pub author: String,
    /// Changed-file suffix.
    pub suffix: String,
}

/// Execute the `commits` command.
///
/// # Errors
///
/// Returns any fetch error.
pub async fn run(
    ctx: &ServiceContext,
    config: &Config,
    url: &str,
    filters: &Filters,
) -> Result<()> {
    let repo = parse_repo_url(url, &config.github.host)?;
    let commits = fetch_commits(ctx, &repo, config.github.commit_page_size).await?;
    print!("{}", render(&view(&commits, filters)));
    Ok(())
}

/// Author groups after the flat filters and the path filter.
fn view(commits: &[Commit], filters: &Filters) -> Vec<AuthorGroup> {
    let flat = CommitFilter { author: filters.author.clone(), file_suffix: filters.suffix.clone() };
    filter_by_path(&group_by_author(&flat.apply(commits)), &filters.path)
}

fn render(groups: &[AuthorGroup]) -> String {
    if groups.is_empty() {
        return "No commits match.\n".to_string();
    }
    let mut out = String::new();
    for group in groups {
        let (added, deleted) = group.total_changes();
        let count = group.commits.len();
        let noun = if count == 1 { "commit" } else { "commits" };
        let _ = writeln!(out, "{} ({count} {noun}, +{added} -{deleted})", group.author.login);
        for commit in &group.commits {
            let _ = writeln!(
                out,
                "  {} {} {}",
                commit.short_sha(),
                commit.timestamp.format("%Y-%m-%d"),
                commit.summary()
            );
            for file in &commit.files {
                let _ = writeln!(out, "      {} (+{} -{})", file.path, file.additions, file.deletions);
            }
        }
    }
    out
}
