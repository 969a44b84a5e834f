//! One-shot grounded answers from the language model.

use tracing::{debug, warn};

use super::context::serialize;
use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::graph::RepoGraph;
use crate::ports::llm::{CompletionRequest, LlmClient};

/// Answer used when the model returns no text.
pub const EMPTY_ANSWER: &str = "Unable to analyze the repository structure.";

/// Answer used when the completion call fails.
pub const FAILED_ANSWER: &str = "Error analyzing the repository structure.";

const SYSTEM_PROMPT: &str = "\
You are a code repository expert. Analyze the repository structure and provide technical insights with these rules:
1. Responses must be 40-70 words
2. Be specific and technical
3. Focus on architecture and relationships
4. Use clear, precise language
5. Never use uncertain terms
6. State facts confidently based on the code structure
7. Reference specific files and their connections";

/// Asks questions about a repository graph.
///
/// Each question is a single stateless request with no retry. Failures of
/// the call become [`FAILED_ANSWER`] and are logged, never returned.
pub struct Assistant<'a> {
    llm: &'a dyn LlmClient,
    model: String,
    max_tokens: u32,
}

impl<'a> Assistant<'a> {
    /// Creates an assistant using `llm` with the configured model.
    #[must_use]
    pub fn new(llm: &'a dyn LlmClient, config: &LlmConfig) -> Self {
        Self { llm, model: config.model().to_string(), max_tokens: config.max_tokens }
    }

    /// Builds the request for `question` against `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `selected` is not in `graph`.
    pub fn request(
        &self,
        graph: &RepoGraph,
        selected: Option<&str>,
        question: &str,
    ) -> Result<CompletionRequest> {
        let context = serialize(graph, selected)?;
        Ok(CompletionRequest {
            model: self.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            prompt: format!("Repository Context:\n{context}\n\nQuestion: {question}"),
            max_tokens: self.max_tokens,
        })
    }

    /// Answers `question`, grounded in `graph` and the selected node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a blank question and
    /// [`Error::UnknownNode`] for a selection outside `graph`; neither
    /// reaches the model.
    pub async fn ask(
        &self,
        graph: &RepoGraph,
        selected: Option<&str>,
        question: &str,
    ) -> Result<String> {
        if question.trim().is_empty() {
            return Err(Error::InvalidInput("Question must not be empty".into()));
        }
        let request = self.request(graph, selected, question)?;
        debug!(model = %request.model, context_len = request.prompt.len(), "asking");

        match self.llm.complete(&request).await {
            Ok(response) if response.text.trim().is_empty() => Ok(EMPTY_ANSWER.to_string()),
            Ok(response) => {
                debug!(
                    prompt_tokens = response.prompt_tokens,
                    completion_tokens = response.completion_tokens,
                    "answer received"
                );
                Ok(response.text)
            }
            Err(e) => {
                warn!(error = %e, "chat completion failed");
                Ok(FAILED_ANSWER.to_string())
            }
        }
    }
}
