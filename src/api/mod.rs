//! HTTP API module for the Salary Equivalence Engine.
//!
//! Exposes the equivalence calculation, free-text salary parsing, and the
//! configured currency and period options over REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EquivalenceRequest, ResolvedEquivalence, SalaryParseRequest};
pub use response::{ApiError, ApiErrorResponse, OptionsResponse, SalaryParseResponse};
pub use state::AppState;
