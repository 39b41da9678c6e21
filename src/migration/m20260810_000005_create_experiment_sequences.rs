//! Migration: Create experiment_sequences table.
//!
//! Sequences are composition-owned: deleting an experiment cascades here.

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
                CREATE TABLE experiment_sequences (
                    id SERIAL PRIMARY KEY,
                    experiment_id INTEGER NOT NULL
                        REFERENCES experiments(id) ON DELETE CASCADE,
                    topology_id INTEGER NOT NULL REFERENCES networks(id),
                    disruption_profile_id INTEGER NOT NULL REFERENCES networks(id),

                    -- Opaque encoding parameters, never interpreted server-side
                    encoding_parameters JSONB NOT NULL
                );

                CREATE INDEX idx_experiment_sequences_experiment_id
                    ON experiment_sequences(experiment_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS experiment_sequences CASCADE;")
            .await?;

        Ok(())
    }
}
