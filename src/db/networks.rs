//! Database queries for network profiles.

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entity::network::{self, Entity as Network};
use crate::error::{AppError, AppResult};
use crate::models::NetworkInput;

use super::DbPool;

impl DbPool {
    pub async fn list_networks(&self) -> AppResult<Vec<network::Model>> {
        Network::find()
            .order_by_asc(network::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list networks: {}", e)))
    }

    pub async fn get_network_by_id(&self, id: i32) -> AppResult<Option<network::Model>> {
        Network::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get network: {}", e)))
    }

    /// Batch lookup used when hydrating sequences.
    pub async fn get_networks_by_ids(&self, ids: &[i32]) -> AppResult<Vec<network::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Network::find()
            .filter(network::Column::Id.is_in(ids.iter().copied()))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get networks: {}", e)))
    }

    pub async fn insert_network(&self, input: &NetworkInput) -> AppResult<network::Model> {
        network::ActiveModel {
            name: Set(input.name.clone()),
            packet_loss: Set(input.packet_loss),
            delay_ms: Set(input.delay_ms),
            jitter_ms: Set(input.jitter_ms),
            bandwidth_kbps: Set(input.bandwidth_kbps),
            ..Default::default()
        }
        .insert(self.connection())
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert network: {}", e)))
    }

    pub async fn update_network(
        &self,
        current: network::Model,
        input: &NetworkInput,
    ) -> AppResult<network::Model> {
        let mut active: network::ActiveModel = current.into();
        active.name = Set(input.name.clone());
        active.packet_loss = Set(input.packet_loss);
        active.delay_ms = Set(input.delay_ms);
        active.jitter_ms = Set(input.jitter_ms);
        active.bandwidth_kbps = Set(input.bandwidth_kbps);

        active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update network: {}", e)))
    }

    pub async fn delete_network(&self, id: i32) -> AppResult<()> {
        Network::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete network: {}", e)))?;
        Ok(())
    }
}
