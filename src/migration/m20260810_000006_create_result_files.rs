//! Migration: Create result_files table.
//!
//! Filename uniqueness is scoped per experiment; across experiments the
//! same filename is allowed (files live in id-scoped subdirectories).

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
                CREATE TABLE result_files (
                    id SERIAL PRIMARY KEY,
                    experiment_id INTEGER NOT NULL
                        REFERENCES experiments(id) ON DELETE CASCADE,
                    filename VARCHAR(250) NOT NULL,
                    path VARCHAR(500) NOT NULL,

                    UNIQUE (experiment_id, filename)
                );

                CREATE INDEX idx_result_files_experiment_id
                    ON result_files(experiment_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS result_files CASCADE;")
            .await?;

        Ok(())
    }
}
