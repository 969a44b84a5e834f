//! Live adapters for the `LlmClient` port: Anthropic messages and OpenAI chat completions.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{LlmConfig, LlmProvider};
use crate::error::{Error, Result};
use crate::ports::llm::{CompletionRequest, CompletionResponse, LlmClient};
use crate::ports::PortFuture;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Builds the live client for the configured provider.
#[must_use]
pub fn client_for(config: &LlmConfig) -> Box<dyn LlmClient> {
    let key = config.api_key.clone();
    match config.provider {
        LlmProvider::Anthropic => Box::new(AnthropicClient::new(
            config.api_url.clone().unwrap_or_else(|| ANTHROPIC_API_URL.to_string()),
            key,
        )),
        LlmProvider::OpenAi => Box::new(OpenAiClient::new(
            config.api_url.clone().unwrap_or_else(|| OPENAI_API_URL.to_string()),
            key,
        )),
    }
}

/// Sends a JSON body and returns the raw response text of a successful call.
///
/// `error_message` extracts the provider's message from an error body.
async fn post_json<B: Serialize + Sync>(
    request: reqwest::RequestBuilder,
    body: &B,
    provider: &str,
    error_message: fn(&str) -> Option<String>,
) -> Result<String> {
    let response = request.json(body).send().await.map_err(|e| {
        Error::ExternalService(format!("{provider} API request failed: {e}"))
    })?;

    let status = response.status();
    let text = response.text().await.map_err(|e| {
        Error::ExternalService(format!("Failed to read {provider} API response: {e}"))
    })?;

    if !status.is_success() {
        let msg = error_message(&text).unwrap_or(text);
        return Err(Error::ExternalService(format!(
            "{provider} API error ({}): {msg}",
            status.as_u16()
        )));
    }
    Ok(text)
}

fn missing_key(provider: &str, var: &str) -> Error {
    Error::Config(format!("{provider} API key is not set (expected {var})"))
}

/// Error body shared by both providers: `{"error": {"message": ".."}}`.
#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn api_error_message(text: &str) -> Option<String> {
    serde_json::from_str::<ApiError>(text).ok().map(|e| e.error.message)
}

/// Live LLM client that calls the Anthropic messages API.
pub struct AnthropicClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl AnthropicClient {
    /// Creates a client posting to `api_url`.
    #[must_use]
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self { client: Client::new(), api_url: api_url.into(), api_key }
    }
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: AnthropicUsage,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

impl LlmClient for AnthropicClient {
    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> PortFuture<'a, CompletionResponse> {
        Box::pin(async move {
            let api_key =
                self.api_key.as_deref().ok_or_else(|| missing_key("Anthropic", "ANTHROPIC_API_KEY"))?;

            let body = AnthropicRequest {
                model: &request.model,
                max_tokens: request.max_tokens,
                system: &request.system,
                messages: vec![Message { role: "user", content: &request.prompt }],
            };
            debug!(model = %request.model, "anthropic completion");

            let builder = self
                .client
                .post(&self.api_url)
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION);
            let text = post_json(builder, &body, "Anthropic", api_error_message).await?;

            let response: AnthropicResponse = serde_json::from_str(&text).map_err(|e| {
                Error::ExternalService(format!("Failed to parse Anthropic API response: {e}"))
            })?;

            Ok(CompletionResponse {
                text: response.content.into_iter().map(|block| block.text).collect(),
                prompt_tokens: response.usage.input_tokens,
                completion_tokens: response.usage.output_tokens,
            })
        })
    }
}

/// Live LLM client that calls the OpenAI chat completions API.
pub struct OpenAiClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    /// Creates a client posting to `api_url`.
    #[must_use]
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self { client: Client::new(), api_url: api_url.into(), api_key }
    }
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Text of the first choice, or empty when the model returned none.
fn first_choice_text(response: &mut OpenAiResponse) -> String {
    response.choices.first_mut().and_then(|c| c.message.content.take()).unwrap_or_default()
}

impl LlmClient for OpenAiClient {
    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> PortFuture<'a, CompletionResponse> {
        Box::pin(async move {
            let api_key =
                self.api_key.as_deref().ok_or_else(|| missing_key("OpenAI", "OPENAI_API_KEY"))?;

            let body = OpenAiRequest {
                model: &request.model,
                max_tokens: request.max_tokens,
                messages: vec![
                    Message { role: "system", content: &request.system },
                    Message { role: "user", content: &request.prompt },
                ],
            };
            debug!(model = %request.model, "openai completion");

            let builder = self.client.post(&self.api_url).bearer_auth(api_key);
            let text = post_json(builder, &body, "OpenAI", api_error_message).await?;

            let mut response: OpenAiResponse = serde_json::from_str(&text).map_err(|e| {
                Error::ExternalService(format!("Failed to parse OpenAI API response: {e}"))
            })?;
            let (prompt_tokens, completion_tokens) =
                response.usage.as_ref().map_or((0, 0), |u| (u.prompt_tokens, u.completion_tokens));

            Ok(CompletionResponse {
                text: first_choice_text(&mut response),
                prompt_tokens,
                completion_tokens,
            })
        })
    }
}
