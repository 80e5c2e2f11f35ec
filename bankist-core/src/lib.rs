//! Bankist Core - account, session and rendering logic for a demo bank
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Core entities (Account, Movement, AccountSummary)
//! - **ports**: Trait definitions for external dependencies (AccountRepository, Clock)
//! - **services**: Session state machine, inactivity timer, rendering, logging
//! - **adapters**: Concrete implementations (in-memory store, clocks, demo data)

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::clock::SystemClock;
use adapters::demo::generate_demo_accounts;
use adapters::memory::MemoryAccountRepository;
use config::Config;
use ports::{AccountRepository, Clock};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{Account, AccountSummary, Movement, MovementKind, SortOrder};
pub use services::{
    AccountView, EntryPoint, LogEvent, LoggingService, SessionController, SessionState,
};

/// Main context for Bankist operations
///
/// Holds the configuration, the account store seeded with the demo
/// accounts, and the optional event log.
pub struct BankistContext {
    pub config: Config,
    pub repository: Arc<MemoryAccountRepository>,
    pub clock: Arc<dyn Clock>,
    pub logger: Option<Arc<LoggingService>>,
    pub status_service: StatusService,
}

impl BankistContext {
    /// Create a context backed by a bankist directory (settings and logs)
    ///
    /// A log database that cannot be opened disables logging rather than
    /// failing the whole context.
    pub fn new(bankist_dir: &Path, entry_point: EntryPoint, app_version: &str) -> Result<Self> {
        let config = Config::load(bankist_dir)?;

        let logger = if config.logging_enabled {
            LoggingService::new(bankist_dir, entry_point, app_version)
                .ok()
                .map(Arc::new)
        } else {
            None
        };

        let mut ctx = Self::in_memory(config)?;
        ctx.logger = logger;
        Ok(ctx)
    }

    /// Create a context with no files behind it
    pub fn in_memory(config: Config) -> Result<Self> {
        let repository = Arc::new(MemoryAccountRepository::with_accounts(
            generate_demo_accounts()?,
        )?);
        let status_service =
            StatusService::new(Arc::clone(&repository) as Arc<dyn AccountRepository>);

        Ok(Self {
            config,
            repository,
            clock: Arc::new(SystemClock),
            logger: None,
            status_service,
        })
    }

    /// A fresh, logged-out session controller over this context's store
    pub fn session_controller(&self) -> SessionController {
        let controller = SessionController::new(
            Arc::clone(&self.repository) as Arc<dyn AccountRepository>,
            Arc::clone(&self.clock),
            self.config.session.clone(),
        );
        match &self.logger {
            Some(logger) => controller.with_logger(Arc::clone(logger)),
            None => controller,
        }
    }
}
