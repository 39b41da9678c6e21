//! Database queries for the encoder catalog.

use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, QueryOrder, Set, SqlErr};

use crate::entity::encoder::{self, Entity as Encoder};
use crate::error::{AppError, AppResult};
use crate::models::EncoderInput;

use super::DbPool;

fn map_write_err(e: DbErr, context: &str) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("encoder name must be unique".to_string())
        }
        _ => AppError::Database(format!("{}: {}", context, e)),
    }
}

fn apply(active: &mut encoder::ActiveModel, input: &EncoderInput) {
    active.name = Set(input.name.clone());
    active.encoder_type = Set(input.encoder_type.clone());
    active.comment = Set(input.comment.clone());
    active.scalable = Set(input.scalable);
    active.layer_count = Set(input.layer_count);
    active.path = Set(input.path.clone());
    active.filename = Set(input.filename.clone());
    active.mode_file_required = Set(input.mode_file_required);
    active.seq_file_required = Set(input.seq_file_required);
    active.layers_file_required = Set(input.layers_file_required);
}

impl DbPool {
    pub async fn list_encoders(&self) -> AppResult<Vec<encoder::Model>> {
        Encoder::find()
            .order_by_asc(encoder::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list encoders: {}", e)))
    }

    pub async fn get_encoder_by_id(&self, id: i32) -> AppResult<Option<encoder::Model>> {
        Encoder::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get encoder: {}", e)))
    }

    pub async fn insert_encoder(&self, input: &EncoderInput) -> AppResult<encoder::Model> {
        let mut active = encoder::ActiveModel {
            ..Default::default()
        };
        apply(&mut active, input);

        active
            .insert(self.connection())
            .await
            .map_err(|e| map_write_err(e, "Failed to insert encoder"))
    }

    pub async fn update_encoder(
        &self,
        current: encoder::Model,
        input: &EncoderInput,
    ) -> AppResult<encoder::Model> {
        let mut active: encoder::ActiveModel = current.into();
        apply(&mut active, input);

        active
            .update(self.connection())
            .await
            .map_err(|e| map_write_err(e, "Failed to update encoder"))
    }

    pub async fn delete_encoder(&self, id: i32) -> AppResult<()> {
        Encoder::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete encoder: {}", e)))?;
        Ok(())
    }
}
