//! Token-pool admin console — library crate.
//!
//! Exposes the listing controller, env form, and backend client used by the
//! `tokpool` binary and the integration tests in `tests/`.

pub mod cli;
pub mod client;
pub mod config;
pub mod console;
pub mod errors;
pub mod models;
pub mod notify;
