use crate::core_types::{LLMResponse, Usage};
use crate::errors::NavigatorError;
use serde_json::Value;

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse_openai_response(response: Value) -> Result<LLMResponse, NavigatorError> {
        let choices = response["choices"]
            .as_array()
            .ok_or_else(|| NavigatorError::ParsingError("No choices in response".to_string()))?;

        if choices.is_empty() {
            return Err(NavigatorError::ParsingError(
                "Empty choices array".to_string(),
            ));
        }

        let choice = &choices[0];
        let content = choice["message"]["content"].as_str().map(|s| s.to_string());

        if content.is_none() {
            return Err(NavigatorError::ParsingError(
                "Response has no message content".to_string(),
            ));
        }

        let finish_reason = choice["finish_reason"].as_str().map(|s| s.to_string());
        let usage = serde_json::from_value::<Usage>(response["usage"].clone()).ok();

        Ok(LLMResponse {
            content,
            finish_reason,
            usage,
        })
    }

    /// Locate the JSON payload inside a free-form completion.
    ///
    /// Models wrap their answer in a fenced ```json block, in prose, or send it
    /// bare. The fenced block wins; otherwise the outermost brace pair is taken;
    /// otherwise the text is returned untouched.
    pub fn extract_json_block(content: &str) -> &str {
        if let Some((_, after_fence)) = content.split_once("```json") {
            let block = after_fence
                .split_once("```")
                .map(|(block, _)| block)
                .unwrap_or(after_fence);
            return block.trim();
        }

        if let (Some(start), Some(end)) = (content.find('{'), content.rfind('}')) {
            if start <= end {
                return &content[start..=end];
            }
        }

        content
    }
}
