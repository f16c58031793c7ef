//! Configuration loader for YAML files and environment resolution

use crate::config::types::*;
use crate::errors::NavigatorError;
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Configuration loader with environment resolution
pub struct ConfigLoader;

impl ConfigLoader {
    /// `<config dir>/odoo-nav/config.yaml`, when the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("odoo-nav").join("config.yaml"))
    }

    /// Load from `path`, or from the default location. A missing default file
    /// yields the built-in defaults; a missing explicit file is an error.
    pub async fn load(path: Option<&Path>) -> Result<NavigatorConfig, NavigatorError> {
        if let Some(path) = path {
            return Self::from_file(path).await;
        }

        match Self::default_config_path() {
            Some(path) if path.exists() => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(&path).await
            }
            _ => {
                log::debug!("No configuration file found, using defaults");
                Self::from_defaults()
            }
        }
    }

    pub fn from_defaults() -> Result<NavigatorConfig, NavigatorError> {
        let mut config = NavigatorConfig::default();
        Self::resolve_environment(&mut config, None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<NavigatorConfig, NavigatorError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).await.map_err(|e| {
            NavigatorError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_str(&content, path.parent())
    }

    /// Load configuration from a YAML string
    pub fn from_str(
        content: &str,
        base_dir: Option<&Path>,
    ) -> Result<NavigatorConfig, NavigatorError> {
        let mut config: NavigatorConfig = if content.trim().is_empty() {
            NavigatorConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };

        Self::resolve_environment(&mut config, base_dir)?;
        config.validate()?;

        Ok(config)
    }

    fn resolve_environment(
        config: &mut NavigatorConfig,
        base_dir: Option<&Path>,
    ) -> Result<(), NavigatorError> {
        for env_file in &config.environment.env_files {
            let path = match base_dir {
                Some(dir) if env_file.is_relative() && !dir.as_os_str().is_empty() => {
                    dir.join(env_file)
                }
                _ => env_file.clone(),
            };
            if path.exists() {
                Self::load_env_file(&path)?;
            }
        }

        Self::resolve_llm_auth(&mut config.llm.auth);
        Self::resolve_odoo_password(&mut config.odoo);
        Ok(())
    }

    /// Load `KEY=VALUE` lines into the process environment. Variables that are
    /// already set keep their value.
    pub fn load_env_file<P: AsRef<Path>>(path: P) -> Result<(), NavigatorError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            NavigatorError::ConfigError(format!(
                "Failed to read env file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"').trim_matches('\'');
                if !key.is_empty() && env::var_os(key).is_none() {
                    env::set_var(key, value);
                }
            }
        }

        log::debug!("Loaded environment file {}", path.as_ref().display());
        Ok(())
    }

    fn resolve_llm_auth(auth: &mut LlmAuth) {
        if auth.api_key.is_some() {
            return;
        }
        if let Some(env_var) = &auth.api_key_env {
            if let Ok(api_key) = env::var(env_var) {
                if !api_key.trim().is_empty() {
                    auth.api_key = Some(api_key);
                }
            }
        }
    }

    fn resolve_odoo_password(odoo: &mut OdooConfig) {
        if odoo.password.is_some() {
            return;
        }
        if let Some(env_var) = &odoo.password_env {
            if let Ok(password) = env::var(env_var) {
                odoo.password = Some(password);
            }
        }
    }
}
