//! Harbor database layer
//!
//! Repositories over the PostgreSQL pool. Each repository owns a clone of the pool.

pub mod db;

pub use db::{UserLookup, UserRepository};
