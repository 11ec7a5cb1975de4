//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::PayPeriodConverter;
use crate::error::{EngineError, EngineResult};
use crate::models::{Currency, PayPeriod};

use super::types::{CurrenciesConfig, EngineConfig, WorkingTimeAssumptions, WorkingTimeConfig};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query working-time constants, currencies and
/// supported pay periods.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── working_time.yaml   # Hours/weeks/months/days constants + supported periods
/// └── currencies.yaml     # Base currency and the offered currency list
/// ```
///
/// Exchange rates are not part of the configuration: callers
/// supply a fresh table with every request.
///
/// # Example
///
/// ```no_run
/// use salary_equivalence::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Hours per year: {}", loader.working_time().hours_per_year());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or a missing field (`ConfigParseError`)
    /// - The values are inconsistent, e.g. a zero constant (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let working_time = Self::load_yaml::<WorkingTimeConfig>(&path.join("working_time.yaml"))?;
        let currencies = Self::load_yaml::<CurrenciesConfig>(&path.join("currencies.yaml"))?;

        let config = EngineConfig::new(
            working_time.assumptions,
            working_time.supported_periods,
            currencies.base_currency,
            currencies.currencies,
        )?;

        tracing::debug!(
            path = %path.display(),
            currencies = config.currencies().len(),
            periods = config.supported_periods().len(),
            "Loaded engine configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
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

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the working-time assumptions.
    pub fn working_time(&self) -> &WorkingTimeAssumptions {
        self.config.working_time()
    }

    /// Returns the configured currencies in display order.
    pub fn currencies(&self) -> &[Currency] {
        self.config.currencies()
    }

    /// Returns the supported pay periods, shortest first.
    pub fn supported_periods(&self) -> &[PayPeriod] {
        self.config.supported_periods()
    }

    /// Looks up a currency code in the configured set.
    ///
    /// # Returns
    ///
    /// The parsed currency, or an error if:
    /// - The code is malformed (`InvalidCurrency`)
    /// - The code is well formed but not configured (`UnsupportedCurrency`)
    pub fn get_currency(&self, code: &str) -> EngineResult<Currency> {
        let currency = Currency::new(code)?;
        if self.config.is_supported_currency(&currency) {
            Ok(currency)
        } else {
            Err(EngineError::UnsupportedCurrency {
                code: currency.to_string(),
            })
        }
    }

    /// Parses a pay period name and checks it is supported.
    pub fn get_period(&self, name: &str) -> EngineResult<PayPeriod> {
        let period: PayPeriod = name.parse()?;
        if self.config.supported_periods().contains(&period) {
            Ok(period)
        } else {
            Err(EngineError::InvalidPeriod {
                period: name.to_string(),
            })
        }
    }

    /// Returns a period converter bound to the loaded configuration.
    pub fn period_converter(&self) -> PayPeriodConverter {
        self.config.period_converter()
    }
}
