//! Runtime configuration.
//!
//! ```toml
//! [simulator]
//! latency_ms = 2000
//!
//! [logging]
//! filter = "drug_match_core=info"
//! ```
//!
//! `DRUG_MATCH_CONFIG` points at the file; `DRUG_MATCH_LATENCY_MS`
//! overrides the simulator latency.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "DRUG_MATCH_CONFIG";
pub const LATENCY_VAR: &str = "DRUG_MATCH_LATENCY_MS";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value}")]
    InvalidOverride { var: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DrugMatchConfig {
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulatorConfig {
    /// Simulated analysis round-trip
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_latency_ms() -> u64 { 2000 }
fn default_log_filter() -> String { "drug_match_core=info".to_string() }

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl SimulatorConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl DrugMatchConfig {
    /// Parse a TOML document. Missing sections take their defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Apply overrides from a variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(LATENCY_VAR) {
            self.simulator.latency_ms =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidOverride {
                        var: LATENCY_VAR,
                        value: value.clone(),
                    })?;
        }
        Ok(())
    }

    /// Load from `DRUG_MATCH_CONFIG` if set, else defaults, then apply
    /// environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_path(&path)
                .with_context(|| format!("loading config from {path}"))?,
            Err(_) => Self::default(),
        };
        config
            .apply_overrides(|var| std::env::var(var).ok())
            .context("applying environment overrides")?;
        Ok(config)
    }
}
