//! Configuration loader for settlement policies.
//!
//! This module provides the [`ConfigLoader`] which reads a settlement policy
//! directory:
//!
//! ```text
//! <dir>/policy.yaml        policy metadata and tenure basis
//! <dir>/rates/*.yaml       effective-dated rate files
//! ```

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use super::types::{PolicyMetadata, RateConfig, SettlementConfig, SettlementRules};
use crate::error::{EngineError, EngineResult};

/// Loads and provides access to a settlement policy configuration.
///
/// # Example
///
/// ```no_run
/// use settlement_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/standard").unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let rules = loader.rules_for(date).unwrap();
/// println!("Fund deposit rate: {}", rules.severance_fund.deposit_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SettlementConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `policy.yaml` or the `rates` directory is missing (`ConfigNotFound`)
    /// - the `rates` directory holds no `.yaml` files (`ConfigNotFound`)
    /// - any file contains invalid YAML or invalid values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PolicyMetadata>(&path.join("policy.yaml"))?;
        let rates = Self::load_rates(&path.join("rates"))?;

        debug!(
            policy = %policy.code,
            rate_files = rates.len(),
            "Loaded settlement configuration"
        );

        Ok(Self {
            config: SettlementConfig::new(policy, rates),
        })
    }

    /// Builds a loader from already parsed parts.
    pub fn from_config(config: SettlementConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let rate_config = Self::load_yaml::<RateConfig>(&path)?;
                rate_config
                    .validate()
                    .map_err(|message| EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message,
                    })?;
                rates.push(rate_config);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying settlement configuration.
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Returns the policy metadata.
    pub fn policy(&self) -> &PolicyMetadata {
        self.config.policy()
    }

    /// Resolves the rules effective on `date`.
    ///
    /// Returns `RulesNotFound` if every rate file takes effect after `date`.
    pub fn rules_for(&self, date: NaiveDate) -> EngineResult<SettlementRules> {
        self.config.rules_for(date)
    }
}
