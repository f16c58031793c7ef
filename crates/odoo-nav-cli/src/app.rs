//! Startup and session control for the `odoo-nav` binary.
//!
//! Each step writes its user-facing lines to the given output and reports an
//! exit status instead of exiting, so `main` stays a thin shell.

use std::fmt::Display;
use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;

use odoo_nav_core::config::NavigatorConfig;
use odoo_nav_core::llm::providers::resolve_api_key;
use odoo_nav_core::{AgentFactory, NavigationAgent, OdooConnector};

use crate::repl::{run_repl, CommandHandler, LineReceiver, GOODBYE};

pub const EXIT_FAILURE: i32 = 1;

pub enum Startup {
    Ready(NavigationAgent),
    Exit(i32),
}

/// `Some(EXIT_FAILURE)` after printing how to supply a key, when a Groq key
/// is needed and none can be found.
pub fn check_api_key<W: Write>(
    config: &NavigatorConfig,
    offline: bool,
    output: &mut W,
) -> io::Result<Option<i32>> {
    if offline || resolve_api_key(&config.llm).is_some() {
        return Ok(None);
    }

    writeln!(output, "❌ Groq API key is required.")?;
    writeln!(output, "Please either:")?;
    writeln!(output, "  1. Set GROQ_API_KEY in your .env file")?;
    writeln!(output, "  2. Set GROQ_API_KEY environment variable")?;
    writeln!(output, "  3. Use --groq-api-key command line argument")?;
    Ok(Some(EXIT_FAILURE))
}

pub fn report_init_failure<W: Write>(output: &mut W, error: &dyn Display) -> io::Result<i32> {
    log::error!("Initialization failed: {}", error);
    writeln!(output, "❌ Failed to initialize: {}", error)?;
    Ok(EXIT_FAILURE)
}

/// Connect to Odoo, then build the intent parser, announcing each step
/// before it runs.
pub async fn start<W: Write>(
    config: NavigatorConfig,
    offline: bool,
    output: &mut W,
) -> io::Result<Startup> {
    if let Err(e) = config.validate() {
        return report_init_failure(output, &e).map(Startup::Exit);
    }

    writeln!(output, "🔌 Connecting to Odoo...")?;
    output.flush()?;
    let connector = match OdooConnector::connect(&config.odoo).await {
        Ok(connector) => connector,
        Err(e) => return report_init_failure(output, &e).map(Startup::Exit),
    };

    writeln!(output, "🤖 Initializing AI agent...")?;
    output.flush()?;
    let parser = match AgentFactory::configure_parser(&config, offline) {
        Ok(parser) => parser,
        Err(e) => return report_init_failure(output, &e).map(Startup::Exit),
    };
    let agent = NavigationAgent::new(Arc::new(parser), Arc::new(connector));

    writeln!(output, "✅ Odoo Navigation AI Agent ready!")?;
    writeln!(output, "Type 'help' for assistance, 'quit' or 'exit' to quit.")?;
    writeln!(output, "{}", "-".repeat(50))?;
    Ok(Startup::Ready(agent))
}

/// `--command` mode: answer once and return.
pub async fn run_single_command<H, W>(handler: &H, command: &str, output: &mut W) -> anyhow::Result<()>
where
    H: CommandHandler + ?Sized,
    W: Write,
{
    let response = handler.handle(command).await?;
    writeln!(output, "{}", response)?;
    Ok(())
}

/// Run the REPL until it ends on its own or `interrupt` resolves, in which
/// case the goodbye line is printed. Pending input is abandoned.
pub async fn run_interactive<H, W, I>(
    handler: &H,
    lines: &mut LineReceiver,
    output: &mut W,
    interrupt: I,
) -> anyhow::Result<()>
where
    H: CommandHandler + ?Sized,
    W: Write,
    I: Future<Output = io::Result<()>>,
{
    let interrupted = tokio::select! {
        result = run_repl(handler, lines, output) => {
            result?;
            false
        }
        _ = interrupt => true,
    };

    if interrupted {
        writeln!(output, "\n{}", GOODBYE)?;
        output.flush()?;
    }
    Ok(())
}
