//! CLI command implementations

pub mod accounts;
pub mod logs;
pub mod shell;
pub mod summary;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use bankist_core::{BankistContext, EntryPoint, LoggingService};

/// Run a logging call, ignoring any errors (logging should never break the app)
pub fn log_with(
    logger: &Option<Arc<LoggingService>>,
    log: impl FnOnce(&LoggingService) -> Result<()>,
) {
    if let Some(l) = logger {
        let _ = log(l);
    }
}

/// Get the bankist directory from environment or default
pub fn get_bankist_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BANKIST_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".bankist"))
        .context("Could not find home directory, set BANKIST_DIR")
}

/// Create the bankist context with a freshly seeded bank
pub fn get_context(entry_point: EntryPoint) -> Result<BankistContext> {
    let bankist_dir = get_bankist_dir()?;

    std::fs::create_dir_all(&bankist_dir)
        .with_context(|| format!("Failed to create bankist directory: {:?}", bankist_dir))?;

    BankistContext::new(&bankist_dir, entry_point, env!("CARGO_PKG_VERSION"))
        .context("Failed to initialize bankist context")
}
