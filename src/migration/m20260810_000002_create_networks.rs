//! Migration: Create networks table.
//!
//! Network profiles double as topology and disruption references for
//! experiment sequences.

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
                CREATE TABLE networks (
                    id SERIAL PRIMARY KEY,
                    name VARCHAR(100) NOT NULL,
                    packet_loss INTEGER,
                    delay_ms INTEGER,
                    jitter_ms INTEGER,
                    bandwidth_kbps INTEGER
                );
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS networks CASCADE;")
            .await?;

        Ok(())
    }
}
