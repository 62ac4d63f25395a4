//! Enrollment fee engine.
//!
//! Computes per-student enrollment, renewal and late fees for a registration
//! as of a given date. The review step calls this over HTTP/JSON to show the
//! estimate, and the submission step attaches its total to the webhook
//! payload.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{calculate_fees, calculate_fees_with, FeeError, FeeSchedule};
pub use models::{FeeLineItem, FeeSummary, Location, RegistrationRecord, SignupType};
pub use routes::router;
