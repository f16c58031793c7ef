use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::core_types::Message;
use crate::errors::NavigatorError;
use crate::intent::fallback::RuleMatcher;
use crate::intent::mapping;
use crate::intent::prompt::{user_message, SYSTEM_PROMPT};
use crate::intent::{IntentClassifier, ParsedIntent};
use crate::llm::{ResponseParser, LLM};

/// Shape the classification prompt asks for. Only `entity` drives routing.
#[derive(Debug, Deserialize)]
struct LlmIntent {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    entity: Option<String>,
    #[serde(default)]
    all_entities: Option<Vec<String>>,
    #[serde(default)]
    reasoning: Option<String>,
    #[serde(default)]
    confidence: Option<JsonValue>,
}

pub struct IntentParser {
    llm: Option<Arc<dyn LLM>>,
    matcher: RuleMatcher,
}

impl IntentParser {
    pub fn new(llm: Arc<dyn LLM>) -> Result<Self, NavigatorError> {
        Ok(Self {
            llm: Some(llm),
            matcher: RuleMatcher::new()?,
        })
    }

    /// Rule-only parser; never calls a model.
    pub fn offline() -> Result<Self, NavigatorError> {
        Ok(Self {
            llm: None,
            matcher: RuleMatcher::new()?,
        })
    }

    pub async fn parse(&self, input: &str) -> ParsedIntent {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return ParsedIntent::unknown(input);
        }

        if let Some(llm) = &self.llm {
            match self.classify_with_llm(llm.as_ref(), &input).await {
                Ok(Some(entity)) => {
                    let intent = ParsedIntent::navigation(entity, input.as_str());
                    if intent.entity_model.is_some() || !intent.navigation_targets.is_empty() {
                        return intent;
                    }
                    log::debug!(
                        "LLM entity '{}' is not a known module, using rule-based parsing",
                        intent.entity
                    );
                }
                Ok(None) => log::debug!("LLM returned no entity, using rule-based parsing"),
                Err(e) => log::warn!("Error with LLM parsing: {}", e),
            }
        }

        self.fallback_parse(&input)
    }

    /// Phrase patterns first, then the first navigation key found in the text.
    pub fn fallback_parse(&self, input: &str) -> ParsedIntent {
        let entity = self
            .matcher
            .extract_entity(input)
            .filter(|entity| !entity.is_empty())
            .or_else(|| mapping::find_navigation_key(input).map(str::to_string));

        match entity {
            Some(entity) => ParsedIntent::navigation(entity, input),
            None => ParsedIntent::unknown(input),
        }
    }

    async fn classify_with_llm(
        &self,
        llm: &dyn LLM,
        input: &str,
    ) -> Result<Option<String>, NavigatorError> {
        let messages = vec![Message::system(SYSTEM_PROMPT), Message::user(user_message(input))];
        let response = llm.generate(messages).await?;
        let content = response.content.unwrap_or_default();
        log::debug!("LLM classification response: {}", content);

        let json = ResponseParser::extract_json_block(&content);
        let parsed: LlmIntent = serde_json::from_str(json).map_err(|e| {
            NavigatorError::ParsingError(format!("Error parsing LLM response: {}", e))
        })?;

        log::debug!(
            "LLM intent: type={:?} entities={:?} confidence={:?} reasoning={:?}",
            parsed.kind,
            parsed.all_entities,
            parsed.confidence,
            parsed.reasoning
        );

        Ok(parsed
            .entity
            .map(|entity| entity.to_lowercase())
            .filter(|entity| !entity.is_empty()))
    }
}

#[async_trait]
impl IntentClassifier for IntentParser {
    async fn classify(&self, input: &str) -> Result<ParsedIntent, NavigatorError> {
        Ok(self.parse(input).await)
    }
}
