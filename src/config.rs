//! Settings and configuration structures.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::Result;

/// Main application settings.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Sample data overrides
    #[serde(default)]
    pub data: DataConfig,
    /// JSON API configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Log filter and destination
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Load settings from configuration files and environment variables.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `LOAN_DESK_ENV`)
    /// 3. Environment variables prefixed with `LOAN_DESK__`
    pub fn load() -> Result<Self> {
        let env = std::env::var("LOAN_DESK_ENV").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("LOAN_DESK").prefix_separator("__").separator("__"))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}

/// Where loan and attachment data come from. Unset paths use the embedded sample.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataConfig {
    #[serde(default)]
    pub loans_path: Option<PathBuf>,
    #[serde(default)]
    pub attachments_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Log file. The terminal UI only logs when this is set.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            file: None,
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.bind_addr, "0.0.0.0:3000");
        assert_eq!(settings.logging.filter, "info");
        assert!(settings.logging.file.is_none());
        assert!(settings.data.loans_path.is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = Config::builder()
            .add_source(config::File::from_str(
                "[server]\nbind_addr = \"127.0.0.1:8080\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let settings: Settings = config.try_deserialize().unwrap();
        assert_eq!(settings.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(settings.logging.filter, "info");
    }
}
