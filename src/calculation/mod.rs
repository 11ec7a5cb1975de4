//! Calculation logic for the Salary Equivalence Engine.
//!
//! This module contains the pay period converter, the currency converter and
//! the equivalence matrix builder that orchestrates them. Everything here is
//! pure and synchronous: no I/O, no shared state, safe to call from any
//! number of threads at once.

mod currency;
mod equivalence;
mod pay_period;

pub use currency::convert_currency;
pub use equivalence::{EquivalenceMatrixResult, EquivalenceTargets, build_equivalence_matrix};
pub use pay_period::PayPeriodConverter;
