//! Live adapters for real network interactions.

pub mod github;
pub mod llm;

pub use github::GitHubClient;
pub use llm::{client_for, AnthropicClient, OpenAiClient};
