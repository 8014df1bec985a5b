//! Environment configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Read `AG_ENV`, falling back to `APP_ENV`; unknown values mean development
    pub fn from_env() -> Self {
        env::var("AG_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Name of the optional layered config file for this environment
    pub fn config_file(&self) -> String {
        format!("config/{}", self.as_str())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Log line layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Full,
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug"),
                format: LogFormat::Full,
            },
            Environment::Staging => Self::default(),
            Environment::Production => Self {
                level: String::from("info"),
                format: LogFormat::Compact,
            },
        }
    }
}

fn default_log_format() -> LogFormat {
    LogFormat::Full
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_follows_environment() {
        assert_eq!(Environment::Staging.config_file(), "config/staging");
        assert_eq!(Environment::default().to_string(), "development");
    }

    #[test]
    fn test_parse_environment() {
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("Dev".parse::<Environment>(), Ok(Environment::Development));
        assert!("qa-cluster".parse::<Environment>().is_err());
    }

    #[test]
    fn test_logging_per_environment() {
        assert_eq!(LoggingConfig::for_environment(Environment::Development).level, "debug");
        assert_eq!(
            LoggingConfig::for_environment(Environment::Production).format,
            LogFormat::Compact
        );
    }
}
