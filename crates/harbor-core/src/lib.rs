//! Harbor Core Library
//!
//! Configuration, error types and domain models shared by every Harbor crate.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
