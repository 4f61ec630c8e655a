//! Centralized error handling module
//!
//! Every fallible operation in the crate returns [`AppResult`]. The CLI layer
//! converts into `anyhow::Error` at the top level.

pub mod types;

pub use types::{AppError, AppResult};
