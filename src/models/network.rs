//! Network profile request/response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::network;

/// Input for creating or updating a network profile.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NetworkInput {
    pub name: String,
    pub packet_loss: Option<i32>,
    pub delay_ms: Option<i32>,
    pub jitter_ms: Option<i32>,
    pub bandwidth_kbps: Option<i32>,
}

/// A network profile as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NetworkResponse {
    pub id: i32,
    pub name: String,
    pub packet_loss: Option<i32>,
    pub delay_ms: Option<i32>,
    pub jitter_ms: Option<i32>,
    pub bandwidth_kbps: Option<i32>,
}

impl From<network::Model> for NetworkResponse {
    fn from(m: network::Model) -> Self {
        NetworkResponse {
            id: m.id,
            name: m.name,
            packet_loss: m.packet_loss,
            delay_ms: m.delay_ms,
            jitter_ms: m.jitter_ms,
            bandwidth_kbps: m.bandwidth_kbps,
        }
    }
}
