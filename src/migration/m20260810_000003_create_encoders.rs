//! Migration: Create encoders table.

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
                CREATE TABLE encoders (
                    id SERIAL PRIMARY KEY,
                    name VARCHAR(100) NOT NULL UNIQUE,
                    encoder_type VARCHAR(100),
                    comment VARCHAR(250),
                    scalable BOOLEAN NOT NULL DEFAULT FALSE,
                    layer_count INTEGER,
                    path VARCHAR(250),
                    filename VARCHAR(250),
                    mode_file_required BOOLEAN NOT NULL DEFAULT FALSE,
                    seq_file_required BOOLEAN NOT NULL DEFAULT FALSE,
                    layers_file_required BOOLEAN NOT NULL DEFAULT FALSE
                );
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS encoders CASCADE;")
            .await?;

        Ok(())
    }
}
