//! Command-line front end for the Odoo navigator
//!
//! Argument parsing, startup and the interactive loop live here so they can
//! be tested without a terminal; `main.rs` only wires them to stdin, stdout
//! and the process exit code.

pub mod app;
pub mod args;
pub mod repl;
