//! Harbor API Library
//!
//! HTTP handlers, multipart form parsing and application setup.

pub mod constants;
pub mod error;
mod handlers;
pub mod response;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use error::HttpAppError;
pub use response::ApiResponse;
