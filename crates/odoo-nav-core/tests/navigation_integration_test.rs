use async_trait::async_trait;
use odoo_nav_core::core_types::{LLMResponse, Message};
use odoo_nav_core::errors::NavigatorError;
use odoo_nav_core::intent::IntentParser;
use odoo_nav_core::llm::LLM;
use odoo_nav_core::odoo::{ActionDetails, ActionRef, ClientAction, Menu, OdooGateway, WindowAction};
use odoo_nav_core::xmlrpc::Value;
use odoo_nav_core::{AgentStatus, NavigationAgent};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct MockLLM {
    responses: Arc<Mutex<Vec<String>>>,
}

impl MockLLM {
    fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(
                responses.into_iter().map(str::to_string).collect(),
            )),
        }
    }
}

#[async_trait]
impl LLM for MockLLM {
    async fn generate(&self, _messages: Vec<Message>) -> Result<LLMResponse, NavigatorError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(NavigatorError::LLMError("rate limited".to_string()));
        }
        Ok(LLMResponse::text(responses.remove(0)))
    }
}

/// An Odoo with Sales, Dashboards and Discuss menus plus a contacts action.
struct DemoOdoo {
    menus: HashMap<&'static str, Menu>,
}

impl DemoOdoo {
    fn new() -> Self {
        let mut menus = HashMap::new();
        menus.insert(
            "Sales",
            menu(
                120,
                "Sales",
                ActionDetails::Window(WindowAction {
                    id: 310,
                    name: "Quotations".to_string(),
                    res_model: Some("sale.order".to_string()),
                    view_mode: Some("tree,kanban,form,calendar,pivot,graph,activity".to_string()),
                    domain: None,
                    context: Some("{'search_default_my_quotation': 1}".to_string()),
                }),
            ),
        );
        menus.insert(
            "Dashboards",
            menu(
                88,
                "Dashboards",
                ActionDetails::Client(ClientAction {
                    id: 140,
                    name: "My Dashboard".to_string(),
                    tag: Some("board".to_string()),
                    context: Value::Bool(false),
                    params: Value::Bool(false),
                }),
            ),
        );
        menus.insert(
            "Discuss",
            menu(
                60,
                "Discuss",
                ActionDetails::Client(ClientAction {
                    id: 95,
                    name: "Discuss".to_string(),
                    tag: Some("mail.action_discuss".to_string()),
                    context: Value::Nil,
                    params: Value::Nil,
                }),
            ),
        );
        Self { menus }
    }
}

fn menu(id: i64, name: &str, details: ActionDetails) -> Menu {
    Menu {
        id,
        name: name.to_string(),
        parent_id: None,
        action: Some(ActionRef {
            model: details.model().to_string(),
            id: details.id(),
        }),
        action_details: Some(details),
    }
}

#[async_trait]
impl OdooGateway for DemoOdoo {
    fn base_url(&self) -> String {
        "http://localhost:8069".to_string()
    }

    fn company_id(&self) -> i64 {
        1
    }

    async fn menu_with_action_details(&self, name: &str) -> Result<Option<Menu>, NavigatorError> {
        Ok(self.menus.get(name).cloned())
    }

    async fn action_by_model(&self, model: &str) -> Result<Option<WindowAction>, NavigatorError> {
        if model != "res.partner" {
            return Ok(None);
        }
        Ok(Some(WindowAction {
            id: 77,
            name: "Contacts".to_string(),
            res_model: Some("res.partner".to_string()),
            view_mode: Some("kanban,tree,form,activity".to_string()),
            domain: None,
            context: None,
        }))
    }
}

fn agent_with(llm: MockLLM) -> NavigationAgent {
    let parser = IntentParser::new(Arc::new(llm)).unwrap();
    NavigationAgent::new(Arc::new(parser), Arc::new(DemoOdoo::new()))
}

#[tokio::test]
async fn test_session_of_commands() {
    let llm = MockLLM::new(vec![
        r#"{"type": "navigation", "entity": "sales", "all_entities": ["sales"], "reasoning": "Single top-level module requested", "confidence": 0.95}"#,
        "```json\n{\"type\": \"navigation\", \"entity\": \"dashboard\", \"all_entities\": [\"dashboard\"], \"reasoning\": \"r\", \"confidence\": 0.8}\n```",
        r#"{"type": "navigation", "entity": "customers", "all_entities": ["customers"], "reasoning": "r", "confidence": 0.9}"#,
        r#"{"type": "unknown", "entity": "", "all_entities": [], "reasoning": "No Odoo entities found", "confidence": 0.1}"#,
    ]);
    let agent = agent_with(llm);

    assert_eq!(
        agent.process_input("go to sales").await,
        "🔗 Navigate to sales: http://localhost:8069/web#action=310&model=sale.order&view_type=list&cids=1&menu_id=120"
    );
    assert_eq!(
        agent.process_input("show dashboard").await,
        "🔗 Navigate to dashboard: http://localhost:8069/web#dashboard_id=2&cids=1&menu_id=88&action=140"
    );
    assert_eq!(
        agent.process_input("take me to customers").await,
        "🔗 Navigate to customers: http://localhost:8069/web#action=77&model=res.partner&view_type=kanban&cids=1"
    );

    let state = agent.process("what's the weather").await;
    assert_eq!(state.status, AgentStatus::IntentParsed);
    assert!(state.response.starts_with("❓ I can only help with Odoo page navigation."));
}

#[tokio::test]
async fn test_rule_fallback_when_llm_is_unavailable() {
    let agent = agent_with(MockLLM::new(vec![]));

    assert_eq!(
        agent.process_input("open discuss").await,
        "🔗 Navigate to discuss: http://localhost:8069/web#action=95&menu_id=60&cids=1"
    );
    assert_eq!(
        agent.process_input("navigate to the timesheets screen").await,
        "🔗 Navigate to timesheets: http://localhost:8069/web"
    );
}
