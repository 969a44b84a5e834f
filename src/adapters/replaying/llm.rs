//! Replaying adapter for the `LlmClient` port.

use std::sync::Mutex;

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::llm::{CompletionRequest, CompletionResponse, LlmClient};
use crate::ports::PortFuture;

/// Serves recorded LLM completions from a cassette, in recorded order.
pub struct ReplayingLlmClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingLlmClient {
    /// Creates a replaying LLM client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl LlmClient for ReplayingLlmClient {
    fn complete<'a>(&'a self, _request: &'a CompletionRequest) -> PortFuture<'a, CompletionResponse> {
        let output = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            replayer.next_interaction("llm", "complete").output
        };
        Box::pin(async move { replay_result(output, "llm::complete") })
    }
}
