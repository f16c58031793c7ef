use crate::errors::NavigatorError;
use crate::odoo::{ACT_WINDOW_MODEL, CLIENT_ACTION_MODEL};
use crate::xmlrpc::Value;

/// Reference stored in a menu's `action` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRef {
    pub model: String,
    pub id: i64,
}

impl ActionRef {
    /// Accepts the `"model,id"` string Odoo returns for reference fields, or a `[model, id]` pair.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(reference) => {
                let (model, id) = reference.split_once(',')?;
                Some(Self {
                    model: model.trim().to_string(),
                    id: id.trim().parse().ok()?,
                })
            }
            Value::Array(items) if items.len() >= 2 => Some(Self {
                model: items[0].as_str()?.to_string(),
                id: items[1].as_i64()?,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowAction {
    pub id: i64,
    pub name: String,
    pub res_model: Option<String>,
    pub view_mode: Option<String>,
    pub domain: Option<String>,
    pub context: Option<String>,
}

impl WindowAction {
    pub const FIELDS: [&'static str; 6] = ["id", "name", "res_model", "view_mode", "domain", "context"];

    pub fn from_row(row: &Value) -> Result<Self, NavigatorError> {
        Ok(Self {
            id: required_id(row, ACT_WINDOW_MODEL)?,
            name: string_field(row, "name").unwrap_or_default(),
            res_model: string_field(row, "res_model"),
            view_mode: string_field(row, "view_mode"),
            domain: string_field(row, "domain"),
            context: string_field(row, "context"),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientAction {
    pub id: i64,
    pub name: String,
    pub tag: Option<String>,
    /// Usually a Python-literal string; kept raw.
    pub context: Value,
    pub params: Value,
}

impl ClientAction {
    pub const FIELDS: [&'static str; 5] = ["id", "name", "tag", "context", "params"];

    pub fn from_row(row: &Value) -> Result<Self, NavigatorError> {
        Ok(Self {
            id: required_id(row, CLIENT_ACTION_MODEL)?,
            name: string_field(row, "name").unwrap_or_default(),
            tag: string_field(row, "tag"),
            context: row.get("context").cloned().unwrap_or(Value::Nil),
            params: row.get("params").cloned().unwrap_or(Value::Nil),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionDetails {
    Window(WindowAction),
    Client(ClientAction),
}

impl ActionDetails {
    pub fn id(&self) -> i64 {
        match self {
            ActionDetails::Window(action) => action.id,
            ActionDetails::Client(action) => action.id,
        }
    }

    pub fn model(&self) -> &'static str {
        match self {
            ActionDetails::Window(_) => ACT_WINDOW_MODEL,
            ActionDetails::Client(_) => CLIENT_ACTION_MODEL,
        }
    }
}

/// An `ir.ui.menu` row.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    /// `None` when the stored reference could not be interpreted.
    pub action: Option<ActionRef>,
    /// Set only when the referenced action was read successfully.
    pub action_details: Option<ActionDetails>,
}

impl Menu {
    pub const FIELDS: [&'static str; 4] = ["id", "name", "action", "parent_id"];

    pub fn from_row(row: &Value) -> Result<Self, NavigatorError> {
        Ok(Self {
            id: required_id(row, "ir.ui.menu")?,
            name: string_field(row, "name").unwrap_or_default(),
            parent_id: row
                .get("parent_id")
                .and_then(Value::as_array)
                .and_then(|pair| pair.first())
                .and_then(Value::as_i64),
            action: row.get("action").and_then(ActionRef::from_value),
            action_details: None,
        })
    }

    /// Action id usable in a URL; requires resolved details.
    pub fn action_id(&self) -> Option<i64> {
        self.action_details.as_ref().map(ActionDetails::id)
    }
}

fn required_id(row: &Value, model: &str) -> Result<i64, NavigatorError> {
    row.get("id").and_then(Value::as_i64).ok_or_else(|| {
        NavigatorError::OdooError(format!("{} record without an integer id", model))
    })
}

fn string_field(row: &Value, field: &str) -> Option<String> {
    row.get(field).and_then(Value::as_opt_string)
}
