//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and a
//! remote service (the source-control provider and the language model).
//! Implementations live in `src/adapters/`.

pub mod llm;
pub mod source_control;

use std::future::Future;
use std::pin::Pin;

pub use llm::{CompletionRequest, CompletionResponse, LlmClient};
pub use source_control::{SourceControl, TreeListing};

/// Boxed future returned by port methods; keeps the traits dyn-compatible.
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = crate::error::Result<T>> + Send + 'a>>;
