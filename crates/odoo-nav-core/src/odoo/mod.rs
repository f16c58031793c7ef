//! Odoo access over XML-RPC.
//!
//! `OdooGateway` is the seam between URL generation and the ERP: the
//! navigation handler only needs a base URL, the active company, and two
//! lookups (menu by name, window action by model). `OdooConnector` is the
//! live implementation.

use async_trait::async_trait;

use crate::errors::NavigatorError;

pub mod connector;
pub mod types;

pub use connector::{OdooConnector, SearchOptions};
pub use types::{ActionDetails, ActionRef, ClientAction, Menu, WindowAction};

pub const ACT_WINDOW_MODEL: &str = "ir.actions.act_window";
pub const CLIENT_ACTION_MODEL: &str = "ir.actions.client";

#[async_trait]
pub trait OdooGateway: Send + Sync {
    /// Root of the web client, e.g. `http://localhost:8069`.
    fn base_url(&self) -> String;

    /// Company id used for the `cids` URL parameter.
    fn company_id(&self) -> i64;

    /// Best `ir.ui.menu` match for `name`, with its action resolved when possible.
    async fn menu_with_action_details(&self, name: &str) -> Result<Option<Menu>, NavigatorError>;

    /// First window action opening `model`.
    async fn action_by_model(&self, model: &str) -> Result<Option<WindowAction>, NavigatorError>;
}
