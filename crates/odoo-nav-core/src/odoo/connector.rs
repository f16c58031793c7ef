use async_trait::async_trait;
use reqwest::Client;

use crate::config::OdooConfig;
use crate::errors::NavigatorError;
use crate::odoo::types::{ActionDetails, ActionRef, ClientAction, Menu, WindowAction};
use crate::odoo::{OdooGateway, ACT_WINDOW_MODEL, CLIENT_ACTION_MODEL};
use crate::xmlrpc::{Value, XmlRpcClient};

const DEFAULT_COMPANY_ID: i64 = 1;
const MENU_CANDIDATES: u32 = 5;

/// Optional `search_read` keyword arguments.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub limit: Option<u32>,
    pub offset: u32,
    pub order: Option<String>,
}

impl SearchOptions {
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }
}

/// Build an Odoo search domain from `(field, operator, value)` triples.
pub fn domain<V: Into<Value>>(terms: Vec<(&str, &str, V)>) -> Value {
    Value::Array(
        terms
            .into_iter()
            .map(|(field, op, value)| {
                Value::Array(vec![Value::from(field), Value::from(op), value.into()])
            })
            .collect(),
    )
}

/// Authenticated session against an Odoo instance.
pub struct OdooConnector {
    host: String,
    port: u16,
    db: String,
    password: String,
    uid: i64,
    company_id: i64,
    models: XmlRpcClient,
}

impl OdooConnector {
    /// Authenticate against `/xmlrpc/2/common` and look up the user's company.
    pub async fn connect(config: &OdooConfig) -> Result<Self, NavigatorError> {
        let password = config.password.clone().ok_or_else(|| {
            NavigatorError::ConfigError(format!("No Odoo password provided for {}", config.user))
        })?;

        let client = Client::new();
        let base = format!("http://{}:{}", config.host, config.port);
        let common = XmlRpcClient::with_client(format!("{}/xmlrpc/2/common", base), client.clone());
        let models = XmlRpcClient::with_client(format!("{}/xmlrpc/2/object", base), client);

        log::info!(
            "Authenticating {} on database {} at {}",
            config.user,
            config.db,
            common.endpoint()
        );
        let uid = common
            .call(
                "authenticate",
                vec![
                    Value::from(&config.db),
                    Value::from(&config.user),
                    Value::from(&password),
                    Value::structure(Vec::<(String, Value)>::new()),
                ],
            )
            .await?;

        let uid = match uid {
            Value::Int(uid) if uid > 0 => uid,
            _ => {
                return Err(NavigatorError::AuthenticationFailed(
                    "Check your DB, username, and password.".to_string(),
                ))
            }
        };
        log::info!("Authenticated as uid {}", uid);

        let mut connector = Self {
            host: config.host.clone(),
            port: config.port,
            db: config.db.clone(),
            password,
            uid,
            company_id: DEFAULT_COMPANY_ID,
            models,
        };
        connector.company_id = connector.current_company_id().await;
        Ok(connector)
    }

    pub fn uid(&self) -> i64 {
        self.uid
    }

    async fn current_company_id(&self) -> i64 {
        let rows = self
            .execute_kw(
                "res.users",
                "read",
                vec![Value::from(vec![self.uid])],
                Value::structure([("fields", Value::from(vec!["company_id"]))]),
            )
            .await;

        match rows {
            Ok(rows) => rows
                .as_array()
                .and_then(|rows| rows.first())
                .and_then(|row| row.get("company_id"))
                .and_then(Value::as_array)
                .and_then(|pair| pair.first())
                .and_then(Value::as_i64)
                .unwrap_or(DEFAULT_COMPANY_ID),
            Err(e) => {
                log::warn!("Could not read company of uid {}: {}", self.uid, e);
                DEFAULT_COMPANY_ID
            }
        }
    }

    pub async fn execute_kw(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Value,
    ) -> Result<Value, NavigatorError> {
        self.models
            .call(
                "execute_kw",
                vec![
                    Value::from(&self.db),
                    Value::Int(self.uid),
                    Value::from(&self.password),
                    Value::from(model),
                    Value::from(method),
                    Value::Array(args),
                    kwargs,
                ],
            )
            .await
    }

    /// `search_read` on `model`; `fields` defaults to `name` and `id`.
    pub async fn search_read(
        &self,
        model: &str,
        domain: Value,
        fields: Option<&[&str]>,
        options: SearchOptions,
    ) -> Result<Vec<Value>, NavigatorError> {
        let fields = fields.unwrap_or(&["name", "id"][..]);
        let mut kwargs = vec![
            ("fields".to_string(), Value::from(fields.to_vec())),
            ("offset".to_string(), Value::from(options.offset)),
        ];
        if let Some(limit) = options.limit.filter(|limit| *limit > 0) {
            kwargs.push(("limit".to_string(), Value::from(limit)));
        }
        if let Some(order) = options.order.filter(|order| !order.is_empty()) {
            kwargs.push(("order".to_string(), Value::from(order)));
        }

        let result = self
            .execute_kw(model, "search_read", vec![domain], Value::structure(kwargs))
            .await?;

        match result {
            Value::Array(rows) => Ok(rows),
            other => Err(NavigatorError::OdooError(format!(
                "search_read on {} returned {:?} instead of a list",
                model, other
            ))),
        }
    }

    async fn read_action(&self, action: &ActionRef) -> Result<Option<ActionDetails>, NavigatorError> {
        let fields: &[&str] = match action.model.as_str() {
            ACT_WINDOW_MODEL => &WindowAction::FIELDS[..],
            CLIENT_ACTION_MODEL => &ClientAction::FIELDS[..],
            _ => return Ok(None),
        };

        let rows = self
            .search_read(
                &action.model,
                domain(vec![("id", "=", action.id)]),
                Some(fields),
                SearchOptions::limit(1),
            )
            .await?;

        let Some(row) = rows.first() else {
            return Ok(None);
        };

        let details = if action.model == ACT_WINDOW_MODEL {
            ActionDetails::Window(WindowAction::from_row(row)?)
        } else {
            ActionDetails::Client(ClientAction::from_row(row)?)
        };
        Ok(Some(details))
    }
}

/// Prefer a case-insensitive exact name match, else the first candidate.
fn pick_best_menu<'a>(rows: &'a [Value], name: &str) -> Option<&'a Value> {
    let wanted = name.to_lowercase();
    rows.iter()
        .find(|row| {
            row.get("name")
                .and_then(Value::as_str)
                .is_some_and(|candidate| candidate.to_lowercase() == wanted)
        })
        .or_else(|| rows.first())
}

#[async_trait]
impl OdooGateway for OdooConnector {
    fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    fn company_id(&self) -> i64 {
        self.company_id
    }

    async fn menu_with_action_details(&self, name: &str) -> Result<Option<Menu>, NavigatorError> {
        let rows = self
            .search_read(
                "ir.ui.menu",
                domain(vec![("name", "ilike", name)]),
                Some(&Menu::FIELDS[..]),
                SearchOptions::limit(MENU_CANDIDATES),
            )
            .await?;

        let Some(row) = pick_best_menu(&rows, name) else {
            return Ok(None);
        };
        if row.get("action").map_or(true, Value::is_falsy) {
            return Ok(None);
        }

        let mut menu = Menu::from_row(row)?;
        if let Some(action) = menu.action.clone() {
            match self.read_action(&action).await {
                Ok(details) => menu.action_details = details,
                Err(e) => log::warn!("Could not fetch action details: {}", e),
            }
        }

        log::debug!("Menu lookup for '{}' resolved to {:?}", name, menu);
        Ok(Some(menu))
    }

    async fn action_by_model(&self, model: &str) -> Result<Option<WindowAction>, NavigatorError> {
        let rows = self
            .search_read(
                ACT_WINDOW_MODEL,
                domain(vec![("res_model", "=", model)]),
                Some(&WindowAction::FIELDS[..]),
                SearchOptions::limit(1),
            )
            .await?;

        rows.first().map(WindowAction::from_row).transpose()
    }
}
