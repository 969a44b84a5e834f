//! Recording adapters that capture interactions to cassettes.

pub mod llm;
pub mod source_control;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;
use crate::error::Result;

pub use llm::RecordingLlmClient;
pub use source_control::RecordingSourceControl;

/// Records a fallible interaction using the Ok/Err JSON convention.
///
/// `Ok(v)` is stored as `{"Ok": v}` and `Err(e)` as `{"Err": e}`, with the
/// error keeping its kind so replay returns the same variant.
pub(crate) fn record_result<T: Serialize>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: serde_json::Value,
    result: &Result<T>,
) {
    let output = match result {
        Ok(v) => serde_json::to_value(v).map(|inner| serde_json::json!({ "Ok": inner })),
        Err(e) => serde_json::to_value(e).map(|inner| serde_json::json!({ "Err": inner })),
    };
    let output = match output {
        Ok(output) => output,
        Err(e) => {
            warn!(port, method, error = %e, "interaction not recorded");
            return;
        }
    };

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input, output);
}
