//! Migration: Create input_videos table.

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
                CREATE TABLE input_videos (
                    id SERIAL PRIMARY KEY,
                    group_id INTEGER,
                    filename VARCHAR(250) NOT NULL,
                    path VARCHAR(500) NOT NULL,
                    video_type VARCHAR(50),
                    frame_rate INTEGER,
                    resolution VARCHAR(20),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS input_videos CASCADE;")
            .await?;

        Ok(())
    }
}
