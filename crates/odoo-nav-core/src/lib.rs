//! Core library for a natural-language navigator over the Odoo web client.
//!
//! A command such as "take me to invoices" is classified by a Groq-hosted
//! language model (with a rule-based fallback), mapped to Odoo menu names and
//! models through static tables, resolved against the server over XML-RPC,
//! and returned as a deep link into `/web`.
//!
//! # Architecture Overview
//!
//! - **Intent classification**: `intent`, backed by the `llm` abstraction
//! - **Odoo access**: `xmlrpc` wire codec and client, `odoo` connector and gateway trait
//! - **URL generation**: `navigation`
//! - **Workflow**: `agent` runs parse, navigate and respond over one state value
//! - **Configuration**: YAML plus environment, see `config`

pub mod agent;
pub mod agent_factory;
pub mod config;
pub mod core_types;
pub mod errors;
pub mod intent;
pub mod llm;
pub mod navigation;
pub mod odoo;
pub mod xmlrpc;

pub use agent::{AgentState, AgentStatus, NavigationAgent};
pub use agent_factory::{AgentFactory, AgentFactoryConfig};
pub use config::*;
pub use errors::NavigatorError;
pub use intent::{IntentClassifier, IntentKind, IntentParser, ParsedIntent};
pub use llm::LLM;
pub use navigation::NavigationHandler;
pub use odoo::{OdooConnector, OdooGateway};

#[cfg(test)]
pub mod test_utils;
