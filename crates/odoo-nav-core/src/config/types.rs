//! Configuration type definitions
//!
//! Every section is optional in YAML; missing fields fall back to the same
//! defaults the command line advertises (`localhost:8069`, database `odoo`,
//! Groq's `llama3-8b-8192` at temperature 0.1).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::NavigatorError;
use crate::llm::providers::{DEFAULT_API_KEY_ENV, DEFAULT_GROQ_API_BASE, DEFAULT_GROQ_MODEL};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NavigatorConfig {
    #[serde(default)]
    pub odoo: OdooConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OdooConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db")]
    pub db: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Environment variable holding the password.
    #[serde(default)]
    pub password_env: Option<String>,
}

impl Default for OdooConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db: default_db(),
            user: default_user(),
            password: None,
            password_env: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub auth: LlmAuth,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            temperature: default_temperature(),
            max_tokens: None,
            auth: LlmAuth::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmAuth {
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Option<String>,
}

impl Default for LlmAuth {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentConfig {
    /// Dotenv files loaded before secrets are resolved; relative paths are
    /// taken from the config file's directory, or the working directory.
    #[serde(default = "default_env_files")]
    pub env_files: Vec<PathBuf>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            env_files: default_env_files(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl NavigatorConfig {
    pub fn validate(&self) -> Result<(), NavigatorError> {
        if self.odoo.host.trim().is_empty() {
            return Err(NavigatorError::ConfigError(
                "odoo.host cannot be empty".to_string(),
            ));
        }
        if self.odoo.port == 0 {
            return Err(NavigatorError::ConfigError(
                "odoo.port must be greater than 0".to_string(),
            ));
        }
        if self.odoo.db.trim().is_empty() {
            return Err(NavigatorError::ConfigError(
                "odoo.db cannot be empty".to_string(),
            ));
        }
        if self.odoo.user.trim().is_empty() {
            return Err(NavigatorError::ConfigError(
                "odoo.user cannot be empty".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(NavigatorError::ConfigError(format!(
                "llm.temperature must be between 0 and 2, got {}",
                self.llm.temperature
            )));
        }
        if self.llm.api_base.trim().is_empty() {
            return Err(NavigatorError::ConfigError(
                "llm.api_base cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8069
}

fn default_db() -> String {
    "odoo".to_string()
}

fn default_user() -> String {
    "admin".to_string()
}

fn default_model() -> String {
    DEFAULT_GROQ_MODEL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_GROQ_API_BASE.to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_api_key_env() -> Option<String> {
    Some(DEFAULT_API_KEY_ENV.to_string())
}

fn default_env_files() -> Vec<PathBuf> {
    vec![PathBuf::from(".env")]
}

fn default_log_level() -> String {
    "warn".to_string()
}
