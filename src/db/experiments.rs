//! Database queries for the experiment aggregate.
//!
//! Aggregate writes (create with initial sequences, update with sequence
//! add/remove) run in a single transaction so a failure partway through
//! leaves no partial aggregate behind.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
};

use crate::entity::experiment::{self, Entity as Experiment};
use crate::entity::experiment_sequence::{self, Entity as ExperimentSequence};
use crate::error::{AppError, AppResult};
use crate::models::{ExperimentStatus, SequenceInput};

use super::DbPool;

/// Map a write error, detecting constraint violations the caller can act on.
fn map_write_err(e: DbErr, context: &str) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("experiment name must be unique".to_string())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::InvalidInput(
            "sequence references a network profile that does not exist".to_string(),
        ),
        _ => AppError::Database(format!("{}: {}", context, e)),
    }
}

async fn insert_sequences<C: ConnectionTrait>(
    conn: &C,
    experiment_id: i32,
    sequences: &[SequenceInput],
) -> Result<(), DbErr> {
    for seq in sequences {
        experiment_sequence::ActiveModel {
            experiment_id: Set(experiment_id),
            topology_id: Set(seq.topology_id),
            disruption_profile_id: Set(seq.disruption_profile_id),
            encoding_parameters: Set(seq.encoding_parameters.clone()),
            ..Default::default()
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

impl DbPool {
    /// Get an experiment by ID.
    pub async fn get_experiment_by_id(&self, id: i32) -> AppResult<Option<experiment::Model>> {
        Experiment::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get experiment: {}", e)))
    }

    /// Get an experiment by its unique name.
    pub async fn get_experiment_by_name(&self, name: &str) -> AppResult<Option<experiment::Model>> {
        Experiment::find()
            .filter(experiment::Column::Name.eq(name))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get experiment: {}", e)))
    }

    /// List experiments, optionally restricted to one owner.
    pub async fn list_experiments(&self, owner_id: Option<i32>) -> AppResult<Vec<experiment::Model>> {
        let mut query = Experiment::find().order_by_asc(experiment::Column::Id);
        if let Some(owner_id) = owner_id {
            query = query.filter(experiment::Column::OwnerId.eq(owner_id));
        }
        query
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list experiments: {}", e)))
    }

    /// List the sequences of an experiment in insertion order.
    pub async fn list_sequences(
        &self,
        experiment_id: i32,
    ) -> AppResult<Vec<experiment_sequence::Model>> {
        ExperimentSequence::find()
            .filter(experiment_sequence::Column::ExperimentId.eq(experiment_id))
            .order_by_asc(experiment_sequence::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list sequences: {}", e)))
    }

    /// List the sequences of several experiments in one query.
    pub async fn list_sequences_for_experiments(
        &self,
        experiment_ids: &[i32],
    ) -> AppResult<Vec<experiment_sequence::Model>> {
        if experiment_ids.is_empty() {
            return Ok(Vec::new());
        }
        ExperimentSequence::find()
            .filter(experiment_sequence::Column::ExperimentId.is_in(experiment_ids.iter().copied()))
            .order_by_asc(experiment_sequence::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list sequences: {}", e)))
    }

    /// Insert an experiment together with its initial sequences.
    ///
    /// Runs in one transaction; if any sequence insert fails the experiment
    /// row is rolled back too. A name collision surfaces as `Conflict`.
    pub async fn create_experiment(
        &self,
        name: &str,
        description: &str,
        owner_id: i32,
        sequences: &[SequenceInput],
    ) -> AppResult<experiment::Model> {
        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open transaction: {}", e)))?;

        let model = experiment::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            owner_id: Set(owner_id),
            status: Set(ExperimentStatus::Pending.as_str().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| map_write_err(e, "Failed to insert experiment"))?;

        insert_sequences(&txn, model.id, sequences)
            .await
            .map_err(|e| map_write_err(e, "Failed to insert sequences"))?;

        txn.commit()
            .await
            .map_err(|e| map_write_err(e, "Failed to commit experiment"))?;

        Ok(model)
    }

    /// Apply a partial update to an experiment and its sequence set.
    ///
    /// `remove_ids` must all belong to this experiment; an ID that belongs to
    /// another experiment (or does not exist) rejects the whole update.
    pub async fn update_experiment(
        &self,
        current: experiment::Model,
        name: Option<String>,
        description: Option<String>,
        status: Option<ExperimentStatus>,
        add_sequences: &[SequenceInput],
        remove_ids: &[i32],
    ) -> AppResult<experiment::Model> {
        let experiment_id = current.id;

        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open transaction: {}", e)))?;

        if !remove_ids.is_empty() {
            let owned = ExperimentSequence::find()
                .filter(experiment_sequence::Column::ExperimentId.eq(experiment_id))
                .filter(experiment_sequence::Column::Id.is_in(remove_ids.iter().copied()))
                .all(&txn)
                .await
                .map_err(|e| AppError::Database(format!("Failed to check sequences: {}", e)))?;

            if owned.len() != remove_ids.len() {
                return Err(AppError::InvalidInput(
                    "remove_sequence_ids contains sequences that do not belong to this experiment"
                        .to_string(),
                ));
            }

            ExperimentSequence::delete_many()
                .filter(experiment_sequence::Column::Id.is_in(remove_ids.iter().copied()))
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(format!("Failed to remove sequences: {}", e)))?;
        }

        insert_sequences(&txn, experiment_id, add_sequences)
            .await
            .map_err(|e| map_write_err(e, "Failed to insert sequences"))?;

        let mut active: experiment::ActiveModel = current.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(description) = description {
            active.description = Set(description);
        }
        if let Some(status) = status {
            active.status = Set(status.as_str().to_string());
        }

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| map_write_err(e, "Failed to update experiment"))?;

        txn.commit()
            .await
            .map_err(|e| map_write_err(e, "Failed to commit experiment update"))?;

        Ok(updated)
    }

    /// Delete an experiment; sequences and result file rows cascade.
    pub async fn delete_experiment(&self, id: i32) -> AppResult<()> {
        Experiment::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete experiment: {}", e)))?;
        Ok(())
    }
}
