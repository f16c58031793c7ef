//! Deep-link generation for the Odoo web client.
//!
//! Lookup order for an intent: each navigation target as a menu name, then
//! the entity's model as a window action, then the raw entity as a menu name.
//! If nothing yields a link the plain `/web` root is returned.

use std::sync::Arc;

use crate::errors::NavigatorError;
use crate::intent::ParsedIntent;
use crate::odoo::{ActionDetails, ClientAction, Menu, OdooGateway, WindowAction};
use crate::xmlrpc::Value;

/// Used when a board action carries no usable dashboard id.
pub const DEFAULT_DASHBOARD_ID: i64 = 2;

const DASHBOARD_TAG: &str = "board";
const LIST_PREFERRING_MODELS: [&str; 3] = ["sale.order", "account.move", "purchase.order"];

pub struct NavigationHandler {
    odoo: Arc<dyn OdooGateway>,
}

impl NavigationHandler {
    pub fn new(odoo: Arc<dyn OdooGateway>) -> Self {
        Self { odoo }
    }

    pub async fn generate_navigation_url(
        &self,
        intent: &ParsedIntent,
    ) -> Result<String, NavigatorError> {
        let base_url = self.odoo.base_url();
        let company_id = self.odoo.company_id();

        for target in &intent.navigation_targets {
            if let Some(menu) = self.odoo.menu_with_action_details(target).await? {
                if let Some(url) = build_url_from_menu(&menu, &base_url, company_id) {
                    log::debug!("Menu '{}' matched target '{}'", menu.name, target);
                    return Ok(url);
                }
            }
        }

        if let Some(model) = &intent.entity_model {
            if let Some(action) = self.odoo.action_by_model(model).await? {
                log::debug!("Window action {} opens model {}", action.id, model);
                return Ok(build_url_from_action(&action, &base_url, company_id));
            }
        }

        let entity = intent.entity.to_lowercase();
        if !entity.is_empty() {
            if let Some(menu) = self.odoo.menu_with_action_details(&entity).await? {
                if let Some(url) = build_url_from_menu(&menu, &base_url, company_id) {
                    return Ok(url);
                }
            }
        }

        log::info!("No menu or action found for '{}'", intent.entity);
        Ok(format!("{}/web", base_url))
    }
}

/// `None` when the menu's action could not be resolved.
pub fn build_url_from_menu(menu: &Menu, base_url: &str, company_id: i64) -> Option<String> {
    let details = menu.action_details.as_ref()?;
    let action_id = details.id();
    let menu_id = menu.id;
    let generic = format!(
        "{}/web#action={}&menu_id={}&cids={}",
        base_url, action_id, menu_id, company_id
    );

    let url = match details {
        ActionDetails::Client(client) if client.tag.as_deref() == Some(DASHBOARD_TAG) => {
            match extract_dashboard_id(client) {
                Some(dashboard_id) => format!(
                    "{}/web#dashboard_id={}&cids={}&menu_id={}&action={}",
                    base_url, dashboard_id, company_id, menu_id, action_id
                ),
                None => generic,
            }
        }
        ActionDetails::Client(_) => generic,
        ActionDetails::Window(window) => match non_empty(&window.res_model) {
            Some(model) => {
                let view_type = determine_view_type(window.view_mode.as_deref(), model);
                format!(
                    "{}/web#action={}&model={}&view_type={}&cids={}&menu_id={}",
                    base_url, action_id, model, view_type, company_id, menu_id
                )
            }
            None => generic,
        },
    };

    Some(url)
}

pub fn build_url_from_action(action: &WindowAction, base_url: &str, company_id: i64) -> String {
    match non_empty(&action.res_model) {
        Some(model) => {
            let view_type = determine_view_type(action.view_mode.as_deref(), model);
            format!(
                "{}/web#action={}&model={}&view_type={}&cids={}",
                base_url, action.id, model, view_type, company_id
            )
        }
        None => format!("{}/web#action={}&cids={}", base_url, action.id, company_id),
    }
}

/// Pick the view to open from a comma-separated `view_mode`.
pub fn determine_view_type(view_mode: Option<&str>, model: &str) -> String {
    let view_mode = view_mode.map(str::trim).unwrap_or_default();
    if view_mode.is_empty() {
        return "list".to_string();
    }

    let modes: Vec<&str> = view_mode.split(',').map(str::trim).collect();
    let has = |mode: &str| modes.contains(&mode);
    let first = modes.first().copied().unwrap_or("list");

    if model == "product.template" && has("kanban") {
        "kanban".to_string()
    } else if LIST_PREFERRING_MODELS.contains(&model) && has("list") {
        "list".to_string()
    } else if first == "tree" || first == "list" {
        "list".to_string()
    } else {
        first.to_string()
    }
}

/// Dashboard to open for a board action: the context's `dashboard_id`, then
/// the params', then `DEFAULT_DASHBOARD_ID`. A context that cannot be read
/// as a dict stops the search at the default. An explicit `0` (or a
/// non-numeric value) in params means no dashboard.
pub fn extract_dashboard_id(action: &ClientAction) -> Option<i64> {
    let id = match dashboard_id_in(&action.context) {
        DashboardLookup::Found(id) if id != 0 => id,
        DashboardLookup::Unreadable => DEFAULT_DASHBOARD_ID,
        _ => match dashboard_id_in(&action.params) {
            DashboardLookup::Found(id) => id,
            _ => DEFAULT_DASHBOARD_ID,
        },
    };
    (id != 0).then_some(id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DashboardLookup {
    Found(i64),
    Absent,
    Unreadable,
}

fn dashboard_id_in(value: &Value) -> DashboardLookup {
    match value {
        Value::Nil => DashboardLookup::Absent,
        Value::Struct(_) => match value.get("dashboard_id") {
            Some(id) => DashboardLookup::Found(id.as_i64().unwrap_or(0)),
            None => DashboardLookup::Absent,
        },
        Value::String(literal) => dashboard_id_in_literal(literal),
        _ => DashboardLookup::Unreadable,
    }
}

/// Reads `'dashboard_id': N` out of a Python dict literal without evaluating it.
fn dashboard_id_in_literal(literal: &str) -> DashboardLookup {
    let literal = literal.trim();
    if !(literal.starts_with('{') && literal.ends_with('}')) {
        return DashboardLookup::Unreadable;
    }

    let rest = ["'dashboard_id'", "\"dashboard_id\""]
        .iter()
        .find_map(|key| literal.split_once(key).map(|(_, rest)| rest));
    let Some(rest) = rest else {
        return DashboardLookup::Absent;
    };

    let Some(value) = rest.trim_start().strip_prefix(':') else {
        return DashboardLookup::Unreadable;
    };
    let digits: String = value
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    DashboardLookup::Found(digits.parse().unwrap_or(0))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
