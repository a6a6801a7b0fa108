/// Prefix of the JSON API
pub const API_PREFIX: &str = "/server";

/// User returned by `GET /server`
pub const DEFAULT_USER_ID: i64 = 1;

pub const SUCCESS_MESSAGE: &str = "Success!";

pub const UNKNOWN_ENDPOINT_MESSAGE: &str = "Unknown API endpoint.";

/// Body returned when a handler panics
pub const PANIC_MESSAGE: &str = "Something went wrong!";
