//! `sahayatri chat` command: an interactive question loop.

use std::io::{BufRead, Write};
use std::time::Duration;

use tracing::warn;

use crate::chat::mention::{apply_mention, suggest_mentions};
use crate::chat::reveal::type_out;
use crate::chat::Assistant;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::graph::RepoGraph;
use crate::repository::load;
use crate::state::{Action, Snapshot};

const HELP: &str = "\
Commands:
  /load <url>           explore another repository
  /select <id>          toggle selection of a node
  /clear                clear the selection
  /filter <text>        show authors of commits touching matching paths
  /mention <draft> [#n] suggest node names for the last @, or apply suggestion n
  /help                 show this help
  /quit                 leave
Anything else is a question about the repository.";

/// Execute the `chat` command on the terminal.
///
/// # Errors
///
/// Returns any error from the first load, or [`Error::Output`] if the
/// terminal fails.
pub async fn run(ctx: &ServiceContext, config: &Config, url: &str) -> Result<()> {
    let snapshot = Snapshot::new(load(ctx, url, config).await?);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    chat_loop(ctx, config, snapshot, stdin.lock(), &mut stdout).await?;
    Ok(())
}

/// Reads lines from `input` until `/quit` or end of input.
///
/// A failed `/load` is reported and leaves the current snapshot in place.
/// Returns the final snapshot.
pub(crate) async fn chat_loop<R: BufRead, W: Write>(
    ctx: &ServiceContext,
    config: &Config,
    mut snapshot: Snapshot,
    input: R,
    out: &mut W,
) -> Result<Snapshot> {
    let assistant = Assistant::new(ctx.llm.as_ref(), &config.llm);
    let delay = Duration::from_millis(config.chat.reveal_delay_ms);
    writeln!(out, "{} Type /help for commands.", describe_loaded(&snapshot))
        .map_err(output_error)?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ").and_then(|()| out.flush()).map_err(output_error)?;
        let Some(line) = lines.next() else { break };
        let line = line.map_err(output_error)?;
        let line = line.trim();

        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let message = match command {
            "" => continue,
            "/quit" | "/exit" => break,
            "/help" => HELP.to_string(),
            "/load" => match load(ctx, argument, config).await {
                Ok(data) => {
                    snapshot = Snapshot::new(data);
                    describe_loaded(&snapshot)
                }
                Err(e) => {
                    warn!(url = argument, error = %e, "load failed");
                    let current = snapshot.repo();
                    format!("Could not load {argument}: {e}\nStill exploring {current}.")
                }
            },
            "/select" => match snapshot.apply(Action::SelectNode(argument.to_string())) {
                Ok(next) => {
                    snapshot = next;
                    match snapshot.selection().selected() {
                        Some(id) => format!("Selected {id}"),
                        None => "Selection cleared".to_string(),
                    }
                }
                Err(e) => e.to_string(),
            },
            "/clear" => {
                snapshot = snapshot.apply(Action::ClearSelection)?;
                "Selection cleared".to_string()
            }
            "/filter" => {
                snapshot = snapshot.apply(Action::FilterByPath(argument.to_string()))?;
                describe_filter(&snapshot)
            }
            "/mention" => describe_mention(snapshot.graph(), argument),
            _ if command.starts_with('/') => format!("Unknown command {command}. Try /help."),
            _ => {
                let answer = assistant
                    .ask(snapshot.graph(), snapshot.selection().selected(), line)
                    .await?;
                type_out(&answer, delay, out).await.map_err(output_error)?;
                continue;
            }
        };
        writeln!(out, "{message}").map_err(output_error)?;
    }
    Ok(snapshot)
}

fn describe_loaded(snapshot: &Snapshot) -> String {
    let graph = snapshot.graph();
    format!(
        "Loaded {} ({} files, {} directories).",
        snapshot.repo(),
        graph.file_count(),
        graph.directory_count()
    )
}

/// Numbered suggestions for `draft`, or the draft completed with
/// suggestion `n` when it ends in `#n`.
fn describe_mention(graph: &RepoGraph, argument: &str) -> String {
    let pick = argument.rsplit_once(char::is_whitespace).and_then(|(draft, choice)| {
        let n = choice.strip_prefix('#')?.parse::<usize>().ok()?;
        Some((draft.trim_end(), n))
    });
    let draft = pick.map_or(argument, |(draft, _)| draft);
    let names = suggest_mentions(graph, draft);

    match pick {
        Some((_, n)) => match n.checked_sub(1).and_then(|i| names.get(i)) {
            Some(name) => apply_mention(draft, name),
            None => format!("No suggestion #{n}"),
        },
        None if names.is_empty() => "No matching nodes".to_string(),
        None => names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("#{} {name}", i + 1))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn describe_filter(snapshot: &Snapshot) -> String {
    let groups = snapshot.visible_groups();
    let commits: usize = groups.iter().map(|g| g.commits.len()).sum();
    let authors: Vec<&str> = groups.iter().map(|g| g.author.login.as_str()).collect();
    if snapshot.path_filter().is_empty() {
        format!("Showing all {commits} commits by {}", authors.join(", "))
    } else if groups.is_empty() {
        format!("No commits touch paths matching '{}'", snapshot.path_filter())
    } else {
        format!(
            "{commits} commits touch paths matching '{}': {}",
            snapshot.path_filter(),
            authors.join(", ")
        )
    }
}

fn output_error(e: std::io::Error) -> Error {
    Error::Output(e.to_string())
}
