//! Migration: Create experiments table.
//!
//! The name's unique constraint is the authoritative arbiter for concurrent
//! creates racing on the same name; the in-service pre-check is only an
//! optimization.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE experiments (
                    id SERIAL PRIMARY KEY,
                    name VARCHAR(50) NOT NULL UNIQUE CHECK (name <> ''),
                    description VARCHAR(250) NOT NULL,
                    owner_id INTEGER NOT NULL REFERENCES users(id),
                    status VARCHAR(20) NOT NULL DEFAULT 'PENDING'
                        CHECK (status IN ('PENDING', 'COMPLETE', 'ERROR')),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX idx_experiments_owner_id ON experiments(owner_id);
                CREATE INDEX idx_experiments_name ON experiments(name);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS experiments CASCADE;")
            .await?;

        Ok(())
    }
}
