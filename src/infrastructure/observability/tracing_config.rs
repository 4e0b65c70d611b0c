use crate::presentation::config::{Environment, LoggingSettings};

pub const DEFAULT_LOG_FILTER: &str = "info,lorebook=debug,tower_http=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
}

impl TracingConfig {
    pub fn from_settings(logging: &LoggingSettings, environment: Environment) -> Self {
        let default_filter = if logging.level.trim().is_empty() {
            DEFAULT_LOG_FILTER.to_string()
        } else {
            logging.level.clone()
        };

        Self {
            environment: environment.to_string(),
            json_format: logging.enable_json,
            default_filter,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local.to_string(),
            json_format: false,
            default_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
