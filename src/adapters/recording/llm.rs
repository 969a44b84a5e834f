//! Recording adapter for the `LlmClient` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::llm::{CompletionRequest, CompletionResponse, LlmClient};
use crate::ports::PortFuture;

/// Records LLM interactions while delegating to an inner implementation.
pub struct RecordingLlmClient {
    inner: Box<dyn LlmClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingLlmClient {
    /// Creates a recording LLM client wrapping `inner`.
    pub fn new(inner: Box<dyn LlmClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl LlmClient for RecordingLlmClient {
    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> PortFuture<'a, CompletionResponse> {
        Box::pin(async move {
            let result = self.inner.complete(request).await;
            let input = serde_json::to_value(request).unwrap_or_default();
            record_result(&self.recorder, "llm", "complete", input, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl LlmClient for Echo {
        fn complete<'a>(
            &'a self,
            request: &'a CompletionRequest,
        ) -> PortFuture<'a, CompletionResponse> {
            Box::pin(async move {
                Ok(CompletionResponse {
                    text: request.prompt.to_uppercase(),
                    prompt_tokens: 1,
                    completion_tokens: 1,
                })
            })
        }
    }

    #[tokio::test]
    async fn records_request_and_response() {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new("unused.yaml", "t", "o/r")));
        let client = RecordingLlmClient::new(Box::new(Echo), Arc::clone(&recorder));
        let request = CompletionRequest {
            model: "m".into(),
            system: "s".into(),
            prompt: "hello".into(),
            max_tokens: 8,
        };

        let response = client.complete(&request).await.unwrap();
        assert_eq!(response.text, "HELLO");
        assert_eq!(recorder.lock().unwrap().len(), 1);
    }
}
