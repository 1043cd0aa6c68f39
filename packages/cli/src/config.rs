//! CLI configuration, populated from environment variables.

use std::str::FromStr;

use thiserror::Error;

/// Default `tracing` filter when neither `AITCP_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "aitcp=info,aitcp_core=info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("AITCP_LOG_FORMAT must be 'text' or 'json', got {0:?}")]
    LogFormat(String),
}

/// How log lines are written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::LogFormat(s.to_string())),
        }
    }
}

/// Runtime configuration for the `aitcp` binary.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `AITCP_LOG` | `RUST_LOG`, then `aitcp=info,aitcp_core=info` | `tracing` filter directives |
/// | `AITCP_LOG_FORMAT` | `text` | `text` or `json` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Populate config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Populate config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let nonempty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let log_filter = nonempty("AITCP_LOG")
            .or_else(|| nonempty("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.into());

        let log_format = match lookup("AITCP_LOG_FORMAT") {
            Some(v) => v.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            log_filter,
            log_format,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
