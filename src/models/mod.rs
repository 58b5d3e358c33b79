//! Data models for the WorkOn RBGA API.
//!
//! These models match the published WorkOn wire schema exactly so the mock
//! server stays byte-compatible with real clients.

mod record;
mod request;
mod response;

pub use record::*;
pub use request::*;
pub use response::*;
