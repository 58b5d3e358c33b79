//! REST API module.
//!
//! Contains all endpoint handlers following the published WorkOn contract.

mod requests;
mod template;
mod workitems;

pub use requests::*;
pub use template::*;
pub use workitems::*;

use crate::errors::AppError;

/// Standard not-found error for an unknown request key.
pub(crate) fn request_not_found(key: &str) -> AppError {
    AppError::NotFound(format!("Request with key {} not found", key))
}
