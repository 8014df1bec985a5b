//! MySQL pool for the account tables

use std::str::FromStr;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;
use tracing::{error, info};

use ag_shared::config::DatabaseConfig;

use crate::InfrastructureError;

const IDLE_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Open the pool and verify it answers a trivial query
    ///
    /// # Returns
    /// * `Err(InfrastructureError::Config)` - `url` is unset or unparsable
    /// * `Err(InfrastructureError::Database)` - The server could not be reached
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config(String::from("DATABASE_URL is not set")))?;
        let options = MySqlConnectOptions::from_str(url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout))
            .idle_timeout(IDLE_TIMEOUT)
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .map_err(|e| {
                error!(error = %e, "Account database unreachable");
                InfrastructureError::Database(e)
            })?;

        let pool = Self { pool };
        pool.health_check().await?;
        info!(max_connections = config.max_connections, "Account database pool ready");

        Ok(pool)
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Runs `SELECT 1` against the pool
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(InfrastructureError::Database)
    }
}
