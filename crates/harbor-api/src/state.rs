use std::path::PathBuf;

use harbor_core::Config;
use harbor_db::UserRepository;
use sqlx::PgPool;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub user_repository: UserRepository,
    /// Where multipart file parts are spooled while a request is handled.
    pub temp_dir: PathBuf,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        Self {
            config,
            user_repository: UserRepository::new(pool.clone()),
            pool,
            temp_dir: std::env::temp_dir(),
        }
    }

    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }
}
