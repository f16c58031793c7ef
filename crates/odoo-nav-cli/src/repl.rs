use async_trait::async_trait;
use odoo_nav_core::NavigationAgent;
use std::io::{self, BufRead, Write};
use std::thread;
use tokio::sync::mpsc;

pub const PROMPT: &str = "\n🔍 Enter navigation command: ";
pub const GOODBYE: &str = "👋 Goodbye!";

pub const HELP_TEXT: &str = r#"
🤖 Odoo Navigation AI Agent Help

This agent helps you navigate to different pages in Odoo using natural language.

Examples:
- "go to sales"
- "open invoices" or "open invoicing"
- "take me to customers" or "take me to contacts"
- "show dashboard" or "show dashboards"
- "navigate to products"

Available modules:
sales, invoices, invoicing, customers, contacts, products, inventory, purchases,
employees, settings, apps, dashboard, dashboards, calendar, discuss, inbox,
crm, leads, opportunities, website, pos, manufacturing, projects
"#;

/// Something that answers one command with one line of output.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, command: &str) -> anyhow::Result<String>;
}

#[async_trait]
impl CommandHandler for NavigationAgent {
    async fn handle(&self, command: &str) -> anyhow::Result<String> {
        Ok(self.process_input(command).await)
    }
}

/// Lines read from a blocking source, one per message.
pub type LineReceiver = mpsc::Receiver<io::Result<String>>;

/// Feed `reader` line by line into a channel from a detached thread. The
/// thread is never joined, so a read blocked on a terminal cannot hold up
/// runtime shutdown.
pub fn spawn_line_reader<R>(reader: R) -> LineReceiver
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    thread::spawn(move || {
        for line in reader.lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Read commands until `quit`, `exit`, `q` or end of input.
pub async fn run_repl<H, W>(handler: &H, lines: &mut LineReceiver, output: &mut W) -> anyhow::Result<()>
where
    H: CommandHandler + ?Sized,
    W: Write,
{
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.recv().await else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        let command = line.trim();
        if command.is_empty() {
            continue;
        }

        match command.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                writeln!(output, "{}", GOODBYE)?;
                break;
            }
            "help" => {
                writeln!(output, "{}", HELP_TEXT)?;
                continue;
            }
            _ => {}
        }

        match handler.handle(command).await {
            Ok(response) => writeln!(output, "{}", response)?,
            Err(e) => {
                log::error!("Command '{}' failed: {}", command, e);
                writeln!(output, "❌ Error: {}", e)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Mutex;

    #[derive(Default)]
    struct EchoHandler {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CommandHandler for EchoHandler {
        async fn handle(&self, command: &str) -> anyhow::Result<String> {
            self.seen.lock().unwrap().push(command.to_string());
            if command == "explode" {
                anyhow::bail!("connection lost");
            }
            Ok(format!("handled {}", command))
        }
    }

    async fn session(script: &str) -> (String, Vec<String>) {
        let handler = EchoHandler::default();
        let mut output = Vec::new();
        let mut lines = spawn_line_reader(Cursor::new(script.as_bytes().to_vec()));
        run_repl(&handler, &mut lines, &mut output).await.unwrap();
        let seen = handler.seen.lock().unwrap().clone();
        (String::from_utf8(output).unwrap(), seen)
    }

    #[tokio::test]
    async fn test_commands_until_quit() {
        let (output, seen) = session("go to sales\n\n   \nQUIT\nopen invoices\n").await;
        assert_eq!(seen, vec!["go to sales"]);
        assert!(output.contains("handled go to sales\n"));
        assert!(output.ends_with("👋 Goodbye!\n"));
        assert_eq!(output.matches("🔍 Enter navigation command: ").count(), 4);
    }

    #[tokio::test]
    async fn test_help_is_not_forwarded() {
        let (output, seen) = session("help\nq\n").await;
        assert!(seen.is_empty());
        assert!(output.contains("Odoo Navigation AI Agent Help"));
        assert!(output.contains("crm, leads, opportunities, website, pos, manufacturing, projects"));
    }

    #[tokio::test]
    async fn test_errors_do_not_end_the_loop() {
        let (output, seen) = session("explode\nshow dashboard\nexit\n").await;
        assert_eq!(seen, vec!["explode", "show dashboard"]);
        assert!(output.contains("❌ Error: connection lost\n"));
        assert!(output.contains("handled show dashboard\n"));
    }

    #[tokio::test]
    async fn test_end_of_input_stops_quietly() {
        let (output, seen) = session("open calendar").await;
        assert_eq!(seen, vec!["open calendar"]);
        assert!(!output.contains(GOODBYE));
    }
}
