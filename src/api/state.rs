//! Application state for the Salary Equivalence Engine API.

use std::sync::Arc;

use crate::calculation::PayPeriodConverter;
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded configuration and the period converter built from it.
/// Both are read-only after startup, so handlers share them freely.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    converter: Arc<PayPeriodConverter>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let converter = config.period_converter();
        Self {
            config: Arc::new(config),
            converter: Arc::new(converter),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the converter for the configured working-time assumptions.
    pub fn converter(&self) -> &PayPeriodConverter {
        &self.converter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayPeriod;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_converter_matches_config() {
        let state = AppState::new(ConfigLoader::default());
        for period in PayPeriod::ALL {
            assert!(state.converter().supports(period));
        }
    }
}
