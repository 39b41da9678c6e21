//! Database access layer.
//!
//! `DbPool` wraps a SeaORM connection pool; per-aggregate query methods live
//! in the sibling modules and are implemented as `impl DbPool` blocks.

pub mod encoders;
pub mod experiments;
pub mod networks;
pub mod result_files;
pub mod videos;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;
use sea_orm_migration::MigratorTrait;

/// Shared database handle, cloneable across workers.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to Postgres and run pending migrations.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(10)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10));

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        Migrator::up(&conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Failed to run migrations: {}", e)))?;

        Ok(DbPool { conn })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}
