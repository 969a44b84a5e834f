//! `sahayatri ask` command.

use crate::chat::Assistant;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::repository::load;
use crate::state::{Action, Snapshot};

/// Execute the `ask` command: one grounded answer, printed whole.
///
/// # Errors
///
/// Returns any load error, [`crate::error::Error::UnknownNode`] for a bad
/// `--node`, or [`crate::error::Error::InvalidInput`] for a blank question.
pub async fn run(
    ctx: &ServiceContext,
    config: &Config,
    url: &str,
    question: &str,
    node: Option<&str>,
) -> Result<()> {
    let mut snapshot = Snapshot::new(load(ctx, url, config).await?);
    if let Some(id) = node {
        snapshot = snapshot.apply(Action::SelectNode(id.to_string()))?;
    }

    let assistant = Assistant::new(ctx.llm.as_ref(), &config.llm);
    let answer =
        assistant.ask(snapshot.graph(), snapshot.selection().selected(), question).await?;
    println!("{answer}");
    Ok(())
}
