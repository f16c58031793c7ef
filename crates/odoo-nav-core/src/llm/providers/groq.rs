use crate::core_types::{LLMResponse, Message};
use crate::errors::NavigatorError;
use crate::llm::providers::{DEFAULT_GROQ_API_BASE, DEFAULT_GROQ_MODEL};
use crate::llm::{ResponseParser, LLM};
use async_trait::async_trait;
use reqwest::Client;

use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl GroqClient {
    pub fn new(api_key: String, model: String) -> Self {
        let model = if model.trim().is_empty() {
            DEFAULT_GROQ_MODEL.to_string()
        } else {
            model
        };

        Self {
            client: Client::new(),
            api_key,
            api_base: DEFAULT_GROQ_API_BASE.to_string(),
            model,
            temperature: Some(0.1),
            max_tokens: None,
        }
    }

    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request_body(&self, messages: &[Message]) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });

        if let Some(temp) = self.temperature {
            body["temperature"] = temp.into();
        }

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = max_tokens.into();
        }

        body
    }
}

#[async_trait]
impl LLM for GroqClient {
    async fn generate(&self, messages: Vec<Message>) -> Result<LLMResponse, NavigatorError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = self.build_request_body(&messages);

        log::debug!("Groq API request to {}", url);
        log::debug!(
            "Request body: {}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| NavigatorError::LLMError(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| NavigatorError::LLMError(format!("Failed to read response: {}", e)))?;

        log::debug!("Groq API response ({}): {}", status, response_text);

        if !status.is_success() {
            log::error!("Groq API request failed with status {}", status);
            return Err(NavigatorError::LLMError(format!(
                "API request failed with status {}: {}",
                status, response_text
            )));
        }

        let response_json: Value = serde_json::from_str(&response_text)
            .map_err(|e| NavigatorError::ParsingError(format!("Invalid JSON response: {}", e)))?;

        ResponseParser::parse_openai_response(response_json)
    }
}
