//! Bot configuration loaded from a JSON file.
//! Interacts with the outside world once at startup; the core never reads it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

fn default_command_prefix() -> String {
    "!".to_string()
}

/// Minimal bot configuration: `token` is mandatory, the rest optional.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    pub token: String,
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

impl BotConfig {
    /// Loads and validates the config file (default `config.json`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: BotConfig = serde_json::from_str(raw)?;
        if config.token.is_empty() {
            anyhow::bail!("token must not be empty");
        }
        Ok(config)
    }

    /// Constructs a config with the given token and defaults elsewhere.
    pub fn with_token(token: String) -> Self {
        Self {
            token,
            log_file: None,
            command_prefix: default_command_prefix(),
        }
    }
}
