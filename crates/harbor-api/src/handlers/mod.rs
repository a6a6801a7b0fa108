pub mod health;
pub mod upload;
pub mod users;
pub mod web;
