//! Layered configuration for the fresco binary.
//!
//! Precedence, lowest to highest: bundled defaults, an optional
//! `fresco.toml` in the working directory, then `FRESCO_*` environment
//! variables (e.g. `FRESCO_PROVIDERS__ANTHROPIC_MODEL`).

use config::{Config, Environment, File, FileFormat};
use fresco_error::{ConfigError, FrescoResult};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_CONFIG: &str = r#"
[log]
level = "info"
json = false

[providers]
anthropic_model = "claude-3-5-sonnet-20241022"
openai_model = "gpt-4o-mini"
call_timeout_secs = 120
"#;

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Default filter when RUST_LOG is unset (e.g. "info", "debug")
    pub level: String,
    /// Emit JSON-formatted logs
    pub json: bool,
}

/// Provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Model served by the narrative provider
    pub anthropic_model: String,
    /// Model served by the structured provider
    pub openai_model: String,
    /// Per-call deadline in seconds
    pub call_timeout_secs: u64,
}

impl ProviderConfig {
    /// Per-call deadline as a duration.
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

/// Top-level configuration for the fresco binary.
#[derive(Debug, Clone, Deserialize)]
pub struct FrescoConfig {
    /// Logging section
    pub log: LogConfig,
    /// Provider section
    pub providers: ProviderConfig,
}

impl FrescoConfig {
    /// Load configuration with precedence: env > fresco.toml > defaults.
    pub fn load() -> FrescoResult<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::with_name("fresco").required(false))
            .add_source(Environment::with_prefix("FRESCO").separator("__"))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to read configuration: {}", e)))?;

        settings
            .try_deserialize()
            .map_err(|e| {
                ConfigError::new(format!("Failed to parse configuration: {}", e)).into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_deserialize() {
        let config = FrescoConfig::load().unwrap();
        assert!(!config.providers.anthropic_model.is_empty());
        assert!(!config.providers.openai_model.is_empty());
        assert_eq!(config.providers.call_timeout(), Duration::from_secs(120));
    }
}
