//! Word-by-word reveal of an answer.

use std::io::Write;
use std::time::Duration;

/// Growing prefixes of `message`, one more space-separated word each time.
///
/// The last prefix is the whole message.
pub fn word_prefixes(message: &str) -> impl Iterator<Item = &str> + '_ {
    message
        .match_indices(' ')
        .map(|(i, _)| i)
        .chain(std::iter::once(message.len()))
        .map(move |end| &message[..end])
}

/// Writes `message` to `out` a word at a time, pausing `delay` after each.
///
/// # Errors
///
/// Returns any error from writing or flushing `out`.
pub async fn type_out<W: Write>(
    message: &str,
    delay: Duration,
    out: &mut W,
) -> std::io::Result<()> {
    let mut written = 0;
    for prefix in word_prefixes(message) {
        out.write_all(&message.as_bytes()[written..prefix.len()])?;
        written = prefix.len();
        out.flush()?;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    writeln!(out)
}
