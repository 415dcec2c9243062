use thiserror::Error;

use crate::limits::DEFAULT_MAX_LINE_LEN;
use crate::model::OverlapPolicy;

pub const ENV_OVERLAP: &str = "VENUEHIRE_OVERLAP";
pub const ENV_MAX_LINE_LEN: &str = "VENUEHIRE_MAX_LINE_LEN";
pub const ENV_METRICS_PORT: &str = "VENUEHIRE_METRICS_PORT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("VENUEHIRE_OVERLAP must be `inclusive` or `exclusive`, got `{0}`")]
    InvalidOverlap(String),
    #[error("{var} must be {expected}, got `{value}`")]
    InvalidNumber {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub overlap: OverlapPolicy,
    pub max_line_len: usize,
    pub metrics_port: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overlap: OverlapPolicy::default(),
            max_line_len: DEFAULT_MAX_LINE_LEN,
            metrics_port: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_OVERLAP) {
            config.overlap =
                OverlapPolicy::from_name(&raw).ok_or(ConfigError::InvalidOverlap(raw))?;
        }
        if let Some(raw) = lookup(ENV_MAX_LINE_LEN) {
            config.max_line_len = raw
                .trim()
                .parse()
                .ok()
                .filter(|&n: &usize| n > 0)
                .ok_or(ConfigError::InvalidNumber {
                    var: ENV_MAX_LINE_LEN,
                    expected: "a positive byte count",
                    value: raw,
                })?;
        }
        if let Some(raw) = lookup(ENV_METRICS_PORT) {
            let port = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                var: ENV_METRICS_PORT,
                expected: "a port number",
                value: raw.clone(),
            })?;
            config.metrics_port = Some(port);
        }

        Ok(config)
    }
}
