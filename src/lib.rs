//! Salary Equivalence Engine
//!
//! This crate normalizes a salary quoted in one currency over one pay period
//! (hourly, daily, monthly, yearly) into its equivalents across every
//! requested currency and period. All arithmetic uses exact decimals and every
//! cell of the resulting matrix is derived from one canonical yearly figure.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod salary_text;
