//! LLM provider implementations
//!
//! Groq is the only hosted provider the navigator talks to. Its API is
//! OpenAI-compatible, so the client only differs from a plain OpenAI client
//! by its base URL and defaults.

use std::env;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::errors::NavigatorError;
use crate::llm::LLM;

pub mod groq;

pub const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Resolve the API key from the config, falling back to the configured environment variable
pub fn resolve_api_key(config: &LlmConfig) -> Option<String> {
    config
        .auth
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            let env_var = config
                .auth
                .api_key_env
                .as_deref()
                .unwrap_or(DEFAULT_API_KEY_ENV);
            env::var(env_var).ok().filter(|key| !key.trim().is_empty())
        })
}

/// Create an LLM client from the provider configuration
pub fn create_llm_client(config: &LlmConfig) -> Result<Arc<dyn LLM>, NavigatorError> {
    let api_key = resolve_api_key(config).ok_or_else(|| {
        NavigatorError::ConfigError(format!(
            "No API key found for Groq. Set llm.auth.api_key or the {} environment variable",
            config
                .auth
                .api_key_env
                .as_deref()
                .unwrap_or(DEFAULT_API_KEY_ENV)
        ))
    })?;

    let mut client = groq::GroqClient::new(api_key, config.model.clone())
        .with_api_base(config.api_base.clone())
        .with_temperature(config.temperature);

    if let Some(max_tokens) = config.max_tokens {
        client = client.with_max_tokens(max_tokens);
    }

    Ok(Arc::new(client))
}
