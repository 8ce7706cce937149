//! HTTP API for the payroll engine.
//!
//! Exposes employee management, period generation and the period queries
//! as JSON endpoints, plus a plain-text report.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EmployeeQuery, LineItemQuery, TopQuery, DEFAULT_TOP_LIMIT};
pub use response::{ApiError, ApiErrorResponse, TotalsResponse};
pub use state::{AppState, SharedService};
