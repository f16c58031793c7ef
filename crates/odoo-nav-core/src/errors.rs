//! Error types for the navigation pipeline
//!
//! Every subsystem reports into a single `NavigatorError` so that the agent
//! workflow can turn any failure into a user-facing response. Variants are
//! grouped by where the failure originated (LLM, XML-RPC transport, Odoo
//! semantics, configuration) which lets callers decide whether to degrade
//! gracefully or give up on the current command.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigatorError {
    #[error("LLM interaction failed: {0}")]
    LLMError(String),
    #[error("Parsing error: {0}")]
    ParsingError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("XML-RPC error: {0}")]
    XmlRpcError(String),
    #[error("XML-RPC fault {code}: {message}")]
    Fault { code: i64, message: String },
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("Odoo error: {0}")]
    OdooError(String),
    #[error("I/O error: {0}")]
    IoError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for NavigatorError {
    fn from(err: std::io::Error) -> Self {
        NavigatorError::IoError(err.to_string())
    }
}

impl From<reqwest::Error> for NavigatorError {
    fn from(err: reqwest::Error) -> Self {
        NavigatorError::LLMError(err.to_string())
    }
}

impl From<quick_xml::Error> for NavigatorError {
    fn from(err: quick_xml::Error) -> Self {
        NavigatorError::XmlRpcError(err.to_string())
    }
}

impl From<serde_yaml::Error> for NavigatorError {
    fn from(err: serde_yaml::Error) -> Self {
        NavigatorError::ConfigError(format!("Failed to parse YAML config: {}", err))
    }
}
