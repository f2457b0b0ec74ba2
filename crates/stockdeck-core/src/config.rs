//! Runtime configuration for the simulated data source.
//!
//! Layering, lowest to highest priority: built-in defaults, optional JSON
//! file, `STOCKDECK_*` environment variables, then whatever the caller
//! (usually the CLI) sets explicitly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CoreError, ValidationError};

pub const ENV_FAILURE_RATE: &str = "STOCKDECK_FAILURE_RATE";
pub const ENV_LATENCY_MS: &str = "STOCKDECK_LATENCY_MS";
pub const ENV_FETCH_LIMIT: &str = "STOCKDECK_FETCH_LIMIT";
pub const ENV_SEED: &str = "STOCKDECK_SEED";
pub const ENV_DATASET: &str = "STOCKDECK_DATASET";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchlistConfig {
    /// Probability that a single fetch fails.
    pub failure_rate: f64,
    /// Simulated network latency before a fetch resolves.
    pub latency_ms: u64,
    /// Number of records kept from each shuffled fetch.
    pub fetch_limit: usize,
    /// Seed for the source's random generator; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Alternative dataset file; `None` uses the bundled dataset.
    pub dataset_path: Option<PathBuf>,
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            failure_rate: 0.1,
            latency_ms: 1_200,
            fetch_limit: 27,
            seed: None,
            dataset_path: None,
        }
    }
}

impl WatchlistConfig {
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply `STOCKDECK_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup. Unparseable or
    /// blank values are ignored and the current value is kept.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        if let Some(value) = read(ENV_FAILURE_RATE).and_then(|v| v.parse().ok()) {
            self.failure_rate = value;
        }
        if let Some(value) = read(ENV_LATENCY_MS).and_then(|v| v.parse().ok()) {
            self.latency_ms = value;
        }
        if let Some(value) = read(ENV_FETCH_LIMIT).and_then(|v| v.parse().ok()) {
            self.fetch_limit = value;
        }
        if let Some(value) = read(ENV_SEED).and_then(|v| v.parse().ok()) {
            self.seed = Some(value);
        }
        if let Some(value) = read(ENV_DATASET) {
            self.dataset_path = Some(PathBuf::from(value));
        }
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(ValidationError::InvalidFailureRate {
                value: self.failure_rate.to_string(),
            });
        }
        if self.fetch_limit == 0 {
            return Err(ValidationError::ZeroFetchLimit);
        }
        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_match_simulated_network() {
        let config = WatchlistConfig::default();
        assert_eq!(config.failure_rate, 0.1);
        assert_eq!(config.latency(), Duration::from_millis(1_200));
        assert_eq!(config.fetch_limit, 27);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_replace_only_parseable_values() {
        let vars = HashMap::from([
            (ENV_FAILURE_RATE, "0.5"),
            (ENV_LATENCY_MS, "not-a-number"),
            (ENV_SEED, " 42 "),
            (ENV_DATASET, ""),
        ]);
        let config = WatchlistConfig::default()
            .with_overrides(|name| vars.get(name).map(|value| (*value).to_owned()));

        assert_eq!(config.failure_rate, 0.5);
        assert_eq!(config.latency_ms, 1_200);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.dataset_path, None);
    }

    #[test]
    fn rejects_out_of_range_failure_rate() {
        let config = WatchlistConfig {
            failure_rate: 1.5,
            ..WatchlistConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidFailureRate { .. })
        ));
    }

    #[test]
    fn rejects_zero_fetch_limit() {
        let config = WatchlistConfig {
            fetch_limit: 0,
            ..WatchlistConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::ZeroFetchLimit));
    }
}
