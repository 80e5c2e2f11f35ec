//! Configuration management
//!
//! Settings live in `settings.json` inside the bankist directory:
//! ```json
//! {
//!   "app": { "loggingEnabled": true },
//!   "session": { "timeoutSeconds": 120, "tickMillis": 1000, "processingDelayMillis": 2000 }
//! }
//! ```
//! Keys this crate doesn't know about are preserved on save.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEOUT_TICKS: u32 = 120;
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    session: SessionSection,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    logging_enabled: Option<bool>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tick_millis: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    processing_delay_millis: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Timing of a login session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Ticks before an idle session is logged out
    pub timeout_ticks: u32,
    pub tick: Duration,
    /// Simulated latency of transfers and loans
    pub processing_delay: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            timeout_ticks: DEFAULT_TIMEOUT_TICKS,
            tick: DEFAULT_TICK,
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }
}

/// Bankist configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub session: SessionSettings,
    pub logging_enabled: bool,
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionSettings::default(),
            logging_enabled: true,
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the bankist directory
    ///
    /// Environment overrides (for CI and demos):
    /// - `BANKIST_SESSION_TIMEOUT`: timeout in ticks
    /// - `BANKIST_PROCESSING_DELAY_MS`: processing delay in milliseconds
    pub fn load(bankist_dir: &Path) -> Result<Self> {
        Self::load_with_env(bankist_dir, |key| std::env::var(key).ok())
    }

    fn load_with_env(bankist_dir: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw = Self::read_settings(bankist_dir)?;

        let env_timeout = env("BANKIST_SESSION_TIMEOUT").and_then(|v| v.trim().parse().ok());
        let env_delay = env("BANKIST_PROCESSING_DELAY_MS").and_then(|v| v.trim().parse().ok());

        let defaults = SessionSettings::default();
        let session = SessionSettings {
            timeout_ticks: env_timeout
                .or(raw.session.timeout_seconds)
                .unwrap_or(defaults.timeout_ticks),
            tick: raw
                .session
                .tick_millis
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick),
            processing_delay: env_delay
                .or(raw.session.processing_delay_millis)
                .map(Duration::from_millis)
                .unwrap_or(defaults.processing_delay),
        };

        Ok(Self {
            session,
            logging_enabled: raw.app.logging_enabled.unwrap_or(true),
            _raw_settings: raw,
        })
    }

    fn read_settings(bankist_dir: &Path) -> Result<SettingsFile> {
        let settings_path = bankist_dir.join("settings.json");
        if !settings_path.exists() {
            return Ok(SettingsFile::default());
        }
        let content = std::fs::read_to_string(&settings_path)?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    /// Save config to the bankist directory, keeping keys we don't manage
    pub fn save(&self, bankist_dir: &Path) -> Result<()> {
        let mut settings = Self::read_settings(bankist_dir)?;

        settings.app.logging_enabled = Some(self.logging_enabled);
        settings.session.timeout_seconds = Some(self.session.timeout_ticks);
        settings.session.tick_millis = Some(self.session.tick.as_millis() as u64);
        settings.session.processing_delay_millis =
            Some(self.session.processing_delay.as_millis() as u64);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(bankist_dir.join("settings.json"), content)?;
        Ok(())
    }
}
