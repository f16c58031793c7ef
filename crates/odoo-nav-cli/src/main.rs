use anyhow::Result;
use clap::Parser;
use dialoguer::Password;
use log::LevelFilter;
use odoo_nav_cli::app::{self, Startup};
use odoo_nav_cli::args::Cli;
use odoo_nav_cli::repl::spawn_line_reader;
use odoo_nav_core::config::ConfigLoader;
use std::io::{self, BufReader};
use std::process;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut stdout = io::stdout();

    let mut config = match ConfigLoader::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => process::exit(app::report_init_failure(&mut stdout, &e)?),
    };
    cli.apply_overrides(&mut config);

    let log_level_filter = config.logging.level.parse().unwrap_or(LevelFilter::Warn);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    if let Some(code) = app::check_api_key(&config, cli.offline, &mut stdout)? {
        process::exit(code);
    }

    if config.odoo.password.is_none() {
        let password = Password::new()
            .with_prompt(format!("Enter password for {}", config.odoo.user))
            .allow_empty_password(true)
            .interact()?;
        config.odoo.password = Some(password);
    }

    let agent = match app::start(config, cli.offline, &mut stdout).await? {
        Startup::Ready(agent) => agent,
        Startup::Exit(code) => process::exit(code),
    };

    if let Some(command) = &cli.command {
        return app::run_single_command(&agent, command, &mut stdout).await;
    }

    let mut lines = spawn_line_reader(BufReader::new(io::stdin()));
    // The reader thread is never joined, so a pending stdin read cannot hold up shutdown.
    app::run_interactive(&agent, &mut lines, &mut stdout, tokio::signal::ctrl_c()).await
}
