//! Database queries for result files.

use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};

use crate::entity::result_file::{self, Entity as ResultFile};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// List the result files recorded for an experiment.
    pub async fn list_result_files(&self, experiment_id: i32) -> AppResult<Vec<result_file::Model>> {
        ResultFile::find()
            .filter(result_file::Column::ExperimentId.eq(experiment_id))
            .order_by_asc(result_file::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list result files: {}", e)))
    }

    /// Look up a result file of an experiment by filename.
    pub async fn get_result_file(
        &self,
        experiment_id: i32,
        filename: &str,
    ) -> AppResult<Option<result_file::Model>> {
        ResultFile::find()
            .filter(result_file::Column::ExperimentId.eq(experiment_id))
            .filter(result_file::Column::Filename.eq(filename))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get result file: {}", e)))
    }

    /// Record an uploaded result file.
    ///
    /// The (experiment, filename) pair is unique; a concurrent duplicate
    /// upload surfaces as `Conflict`.
    pub async fn insert_result_file(
        &self,
        experiment_id: i32,
        filename: &str,
        path: &str,
    ) -> AppResult<result_file::Model> {
        result_file::ActiveModel {
            experiment_id: Set(experiment_id),
            filename: Set(filename.to_string()),
            path: Set(path.to_string()),
            ..Default::default()
        }
        .insert(self.connection())
        .await
        .map_err(|e: DbErr| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(format!(
                "result file '{}' already exists for this experiment",
                filename
            )),
            _ => AppError::Database(format!("Failed to insert result file: {}", e)),
        })
    }
}
