//! Database repositories for data access layer

pub mod user;

pub use user::{UserLookup, UserRepository};
