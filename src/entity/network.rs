//! Network profile entity, referenced by sequences as topology or disruption profile.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "networks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub packet_loss: Option<i32>,
    pub delay_ms: Option<i32>,
    pub jitter_ms: Option<i32>,
    pub bandwidth_kbps: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
