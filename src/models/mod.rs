//! Core data models for the Salary Equivalence Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod currency;
mod equivalence;
mod exchange_rate;
mod pay_period;
mod salary;

pub(crate) use currency::validate_amount;
pub use currency::{Currency, MonetaryAmount};
pub use equivalence::{AuditStep, AuditTrace, AuditWarning, EquivalenceMatrix, EquivalenceResult};
pub use exchange_rate::ExchangeRateTable;
pub use pay_period::PayPeriod;
pub use salary::SalaryObservation;
