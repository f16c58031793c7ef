//! Navigation agent workflow.
//!
//! A command runs through three nodes over one `AgentState`: intent parsing,
//! URL generation (only for navigation intents that parsed cleanly), and the
//! response text. Node failures never escape; they are recorded in the state
//! and rendered by the response node.

use std::sync::Arc;

use serde::Serialize;

use crate::errors::NavigatorError;
use crate::intent::{IntentClassifier, IntentKind, ParsedIntent};
use crate::navigation::NavigationHandler;
use crate::odoo::OdooGateway;

pub const UNKNOWN_INTENT_RESPONSE: &str = "❓ I can only help with Odoo page navigation. Please specify which Odoo page or module you'd like to navigate to (e.g., 'go to sales', 'open invoices').";
pub const NOT_UNDERSTOOD_RESPONSE: &str =
    "❓ I couldn't understand your navigation request. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Pending,
    IntentParsed,
    NavigationGenerated,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentState {
    pub user_input: String,
    pub parsed_intent: Option<ParsedIntent>,
    pub odoo_url: Option<String>,
    pub status: AgentStatus,
    pub error_message: Option<String>,
    pub response: String,
}

impl AgentState {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            parsed_intent: None,
            odoo_url: None,
            status: AgentStatus::Pending,
            error_message: None,
            response: String::new(),
        }
    }

    fn fail(&mut self, message: String) {
        log::error!("{}", message);
        self.status = AgentStatus::Error;
        self.error_message = Some(message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    ParseIntent,
    GenerateNavigation,
    GenerateResponse,
}

pub struct NavigationAgent {
    classifier: Arc<dyn IntentClassifier>,
    handler: NavigationHandler,
}

impl NavigationAgent {
    pub fn new(classifier: Arc<dyn IntentClassifier>, odoo: Arc<dyn OdooGateway>) -> Self {
        Self {
            classifier,
            handler: NavigationHandler::new(odoo),
        }
    }

    /// Run the workflow and return only the response text.
    pub async fn process_input(&self, user_input: &str) -> String {
        self.process(user_input).await.response
    }

    pub async fn process(&self, user_input: &str) -> AgentState {
        let mut state = AgentState::new(user_input);
        let mut node = Some(Node::ParseIntent);

        while let Some(current) = node {
            log::debug!("Running node {:?}", current);
            node = match current {
                Node::ParseIntent => {
                    self.parse_intent(&mut state).await;
                    Some(route_after_parse(&state))
                }
                Node::GenerateNavigation => {
                    self.generate_navigation(&mut state).await;
                    Some(Node::GenerateResponse)
                }
                Node::GenerateResponse => {
                    generate_response(&mut state);
                    None
                }
            };
        }

        state
    }

    async fn parse_intent(&self, state: &mut AgentState) {
        match self.classifier.classify(&state.user_input).await {
            Ok(intent) => {
                log::info!("Parsed intent {:?} for '{}'", intent.kind, intent.entity);
                state.parsed_intent = Some(intent);
                state.status = AgentStatus::IntentParsed;
            }
            Err(e) => state.fail(format!("Error parsing intent: {}", e)),
        }
    }

    async fn generate_navigation(&self, state: &mut AgentState) {
        let result = match &state.parsed_intent {
            Some(intent) => self.handler.generate_navigation_url(intent).await,
            None => Err(NavigatorError::InternalError("no parsed intent".to_string())),
        };

        match result {
            Ok(url) => {
                state.odoo_url = Some(url);
                state.status = AgentStatus::NavigationGenerated;
            }
            Err(e) => state.fail(format!("Error generating navigation: {}", e)),
        }
    }
}

fn route_after_parse(state: &AgentState) -> Node {
    match (&state.status, &state.parsed_intent) {
        (AgentStatus::Error, _) => Node::GenerateResponse,
        (_, Some(intent)) if intent.is_navigation() => Node::GenerateNavigation,
        _ => Node::GenerateResponse,
    }
}

fn generate_response(state: &mut AgentState) {
    state.response = match state.status {
        AgentStatus::Error => format!(
            "❌ Error: {}",
            state.error_message.as_deref().unwrap_or("Unknown error")
        ),
        AgentStatus::NavigationGenerated => {
            let entity = state
                .parsed_intent
                .as_ref()
                .map(|intent| intent.entity.as_str())
                .unwrap_or("page");
            format!(
                "🔗 Navigate to {}: {}",
                entity,
                state.odoo_url.as_deref().unwrap_or_default()
            )
        }
        _ if state
            .parsed_intent
            .as_ref()
            .is_some_and(|intent| intent.kind == IntentKind::Unknown) =>
        {
            UNKNOWN_INTENT_RESPONSE.to_string()
        }
        _ => NOT_UNDERSTOOD_RESPONSE.to_string(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentParser;
    use crate::odoo::{ActionDetails, ActionRef, Menu, WindowAction};
    use async_trait::async_trait;

    struct StaticGateway {
        fail: bool,
    }

    #[async_trait]
    impl OdooGateway for StaticGateway {
        fn base_url(&self) -> String {
            "http://erp:8069".to_string()
        }

        fn company_id(&self) -> i64 {
            1
        }

        async fn menu_with_action_details(&self, name: &str) -> Result<Option<Menu>, NavigatorError> {
            if self.fail {
                return Err(NavigatorError::Fault {
                    code: 2,
                    message: "Access Denied".to_string(),
                });
            }
            if name != "Sales" {
                return Ok(None);
            }
            Ok(Some(Menu {
                id: 7,
                name: "Sales".to_string(),
                parent_id: None,
                action: Some(ActionRef {
                    model: "ir.actions.act_window".to_string(),
                    id: 11,
                }),
                action_details: Some(ActionDetails::Window(WindowAction {
                    id: 11,
                    name: "Quotations".to_string(),
                    res_model: Some("sale.order".to_string()),
                    view_mode: Some("tree,form".to_string()),
                    domain: None,
                    context: None,
                })),
            }))
        }

        async fn action_by_model(&self, _model: &str) -> Result<Option<WindowAction>, NavigatorError> {
            Ok(None)
        }
    }

    struct BrokenClassifier;

    #[async_trait]
    impl IntentClassifier for BrokenClassifier {
        async fn classify(&self, _input: &str) -> Result<ParsedIntent, NavigatorError> {
            Err(NavigatorError::ParsingError("bad input".to_string()))
        }
    }

    fn agent(fail: bool) -> NavigationAgent {
        NavigationAgent::new(
            Arc::new(IntentParser::offline().unwrap()),
            Arc::new(StaticGateway { fail }),
        )
    }

    #[tokio::test]
    async fn test_navigation_response() {
        let state = agent(false).process("go to sales").await;
        assert_eq!(state.status, AgentStatus::NavigationGenerated);
        assert_eq!(
            state.response,
            "🔗 Navigate to sales: http://erp:8069/web#action=11&model=sale.order&view_type=list&cids=1&menu_id=7"
        );
        assert_eq!(state.error_message, None);
    }

    #[tokio::test]
    async fn test_unknown_intent_skips_navigation() {
        let state = agent(true).process("what's the weather").await;
        assert_eq!(state.status, AgentStatus::IntentParsed);
        assert_eq!(state.odoo_url, None);
        assert_eq!(state.response, UNKNOWN_INTENT_RESPONSE);
    }

    #[tokio::test]
    async fn test_navigation_error_is_reported() {
        let response = agent(true).process_input("open sales").await;
        assert_eq!(
            response,
            "❌ Error: Error generating navigation: XML-RPC fault 2: Access Denied"
        );
    }

    #[tokio::test]
    async fn test_parse_error_is_reported() {
        let agent = NavigationAgent::new(
            Arc::new(BrokenClassifier),
            Arc::new(StaticGateway { fail: false }),
        );
        let state = agent.process("go to sales").await;
        assert_eq!(state.status, AgentStatus::Error);
        assert_eq!(state.parsed_intent, None);
        assert_eq!(
            state.response,
            "❌ Error: Error parsing intent: Parsing error: bad input"
        );
    }

    #[test]
    fn test_response_without_intent() {
        let mut state = AgentState::new("");
        generate_response(&mut state);
        assert_eq!(state.response, NOT_UNDERSTOOD_RESPONSE);
    }
}
