use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row of the `users` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub user_id: i64,
    pub user_ref_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_mobile: Option<String>,
    /// Password hash; never leaves the server.
    #[serde(skip_serializing, default)]
    pub user_password: String,
    pub user_created_at: DateTime<Utc>,
}
