//! Intent classification
//!
//! Turns a free-text command into a `ParsedIntent`. The LLM is consulted
//! first; its entity is only trusted when the static tables know it. Anything
//! else, including transport or JSON failures, falls through to phrase
//! patterns and a keyword scan.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::NavigatorError;

pub mod fallback;
pub mod mapping;
pub mod parser;
pub mod prompt;

pub use fallback::RuleMatcher;
pub use parser::IntentParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    Navigation,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIntent {
    pub kind: IntentKind,
    /// Lower-cased; empty for unknown intents.
    pub entity: String,
    pub entity_model: Option<String>,
    pub navigation_targets: Vec<String>,
    pub original_input: String,
}

impl ParsedIntent {
    pub fn unknown(original_input: impl Into<String>) -> Self {
        Self {
            kind: IntentKind::Unknown,
            entity: String::new(),
            entity_model: None,
            navigation_targets: Vec::new(),
            original_input: original_input.into(),
        }
    }

    /// Navigation intent with both table lookups applied to `entity`.
    pub fn navigation(entity: impl Into<String>, original_input: impl Into<String>) -> Self {
        let entity = entity.into();
        Self {
            kind: IntentKind::Navigation,
            entity_model: mapping::odoo_model(&entity),
            navigation_targets: mapping::navigation_targets(&entity),
            entity,
            original_input: original_input.into(),
        }
    }

    pub fn is_navigation(&self) -> bool {
        self.kind == IntentKind::Navigation
    }
}

/// Anything that can turn a command into an intent.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, input: &str) -> Result<ParsedIntent, NavigatorError>;
}
