//! Builds a ready `NavigationAgent` from a `NavigatorConfig`

use std::sync::Arc;

use crate::agent::NavigationAgent;
use crate::config::NavigatorConfig;
use crate::errors::NavigatorError;
use crate::intent::IntentParser;
use crate::llm::providers::create_llm_client;
use crate::odoo::OdooConnector;

pub struct AgentFactory;

pub struct AgentFactoryConfig {
    pub navigator_config: NavigatorConfig,
    /// Classify with the rule-based parser only.
    pub offline: bool,
}

impl AgentFactory {
    /// Authenticate against Odoo, then wire the parser and URL builder together.
    pub async fn create_from_config(
        factory_config: AgentFactoryConfig,
    ) -> Result<NavigationAgent, NavigatorError> {
        let config = factory_config.navigator_config;
        config.validate()?;

        let parser = Self::configure_parser(&config, factory_config.offline)?;
        let connector = OdooConnector::connect(&config.odoo).await?;

        Ok(NavigationAgent::new(Arc::new(parser), Arc::new(connector)))
    }

    /// Groq-backed parser, or the rule-only one when `offline`.
    pub fn configure_parser(
        config: &NavigatorConfig,
        offline: bool,
    ) -> Result<IntentParser, NavigatorError> {
        if offline {
            log::info!("Offline mode: intent classification uses rules only");
            return IntentParser::offline();
        }

        let llm = create_llm_client(&config.llm)?;
        log::info!("Using model {} for intent classification", config.llm.model);
        IntentParser::new(llm)
    }
}
