//! Configuration for the navigator
//!
//! Settings come from an optional YAML file, dotenv-style files, the process
//! environment, and finally command-line overrides applied by the binary.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;


use crate::errors::NavigatorError;
use std::path::Path;

/// Load a configuration from a YAML file
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<NavigatorConfig, NavigatorError> {
    ConfigLoader::from_file(path).await
}
