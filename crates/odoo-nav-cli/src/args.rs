use clap::Parser;
use odoo_nav_core::config::NavigatorConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "odoo-nav",
    author,
    version,
    about = "Navigate Odoo with natural-language commands"
)]
pub struct Cli {
    #[clap(long, short, help = "YAML configuration file (default: <config dir>/odoo-nav/config.yaml)")]
    pub config: Option<PathBuf>,

    #[clap(long, help = "Odoo host (default: localhost)")]
    pub host: Option<String>,

    #[clap(long, help = "Odoo port (default: 8069)")]
    pub port: Option<u16>,

    #[clap(long, help = "Odoo database name (default: odoo)")]
    pub db: Option<String>,

    #[clap(long, help = "Odoo username")]
    pub user: Option<String>,

    #[clap(long, help = "Odoo password (will prompt if not provided)")]
    pub password: Option<String>,

    #[clap(long, help = "Run a single command and exit")]
    pub command: Option<String>,

    #[clap(
        long,
        help = "Groq API key (will use GROQ_API_KEY env var if not provided)"
    )]
    pub groq_api_key: Option<String>,

    #[clap(long, help = "Classify commands with the built-in rules only, without Groq")]
    pub offline: bool,

    #[clap(long, short, help = "Log level: error, warn, info, debug or trace")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Flags win over values from the configuration file and environment.
    pub fn apply_overrides(&self, config: &mut NavigatorConfig) {
        if let Some(host) = &self.host {
            config.odoo.host = host.clone();
        }
        if let Some(port) = self.port {
            config.odoo.port = port;
        }
        if let Some(db) = &self.db {
            config.odoo.db = db.clone();
        }
        if let Some(user) = &self.user {
            config.odoo.user = user.clone();
        }
        if let Some(password) = &self.password {
            config.odoo.password = Some(password.clone());
        }
        if let Some(key) = &self.groq_api_key {
            config.llm.auth.api_key = Some(key.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}
