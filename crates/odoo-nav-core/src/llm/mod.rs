//! Language model abstraction and the Groq provider.
//!
//! Defines the `LLM` trait consumed by the intent parser, the OpenAI-compatible
//! Groq client, and helpers for pulling structured data out of completions.

pub use crate::core_types::{LLMResponse, Message};
use crate::errors::NavigatorError;
use async_trait::async_trait;

pub mod providers;
pub mod response_parser;

pub use providers::groq::GroqClient;
pub use response_parser::ResponseParser;

#[async_trait]
pub trait LLM: Send + Sync {
    async fn generate(&self, messages: Vec<Message>) -> Result<LLMResponse, NavigatorError>;
}
