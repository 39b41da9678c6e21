//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20260810_000001_create_users;
mod m20260810_000002_create_networks;
mod m20260810_000003_create_encoders;
mod m20260810_000004_create_experiments;
mod m20260810_000005_create_experiment_sequences;
mod m20260810_000006_create_result_files;
mod m20260810_000007_create_input_videos;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260810_000001_create_users::Migration),
            Box::new(m20260810_000002_create_networks::Migration),
            Box::new(m20260810_000003_create_encoders::Migration),
            Box::new(m20260810_000004_create_experiments::Migration),
            Box::new(m20260810_000005_create_experiment_sequences::Migration),
            Box::new(m20260810_000006_create_result_files::Migration),
            Box::new(m20260810_000007_create_input_videos::Migration),
        ]
    }
}
