//! Configuration loading and management for the Salary Equivalence Engine.
//!
//! This module loads the working-time assumptions and the configured currency
//! and pay period sets from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use salary_equivalence::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Currencies: {:?}", config.currencies());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CurrenciesConfig, EngineConfig, WorkingTimeAssumptions, WorkingTimeConfig};
