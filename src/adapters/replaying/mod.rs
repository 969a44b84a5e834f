//! Replaying adapters that serve recorded interactions.

pub mod llm;
pub mod source_control;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

pub use llm::ReplayingLlmClient;
pub use source_control::ReplayingSourceControl;

/// Rebuilds a recorded `{"Ok": v}` or `{"Err": e}` output.
///
/// A malformed output is an [`Error::Cassette`], never a panic, so a broken
/// cassette surfaces as a failed command.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T> {
    let serde_json::Value::Object(mut map) = output else {
        return Err(Error::Cassette(format!("{context}: output is not an Ok/Err object")));
    };
    if let Some(err) = map.remove("Err") {
        let err: Error = serde_json::from_value(err)
            .map_err(|e| Error::Cassette(format!("{context}: bad recorded error: {e}")))?;
        return Err(err);
    }
    let value = map
        .remove("Ok")
        .ok_or_else(|| Error::Cassette(format!("{context}: output has neither Ok nor Err")))?;
    serde_json::from_value(value)
        .map_err(|e| Error::Cassette(format!("{context}: failed to deserialize: {e}")))
}
