//! Experiment sequence entity: one topology/disruption/encoding combination.
//!
//! Weak entity scoped under a parent experiment. The encoding parameters are
//! an opaque JSONB map the service never interprets.

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "experiment_sequences")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub experiment_id: i32,
    pub topology_id: i32,
    pub disruption_profile_id: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub encoding_parameters: JsonValue,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::experiment::Entity",
        from = "Column::ExperimentId",
        to = "super::experiment::Column::Id",
        on_delete = "Cascade"
    )]
    Experiment,
    #[sea_orm(
        belongs_to = "super::network::Entity",
        from = "Column::TopologyId",
        to = "super::network::Column::Id"
    )]
    Topology,
    #[sea_orm(
        belongs_to = "super::network::Entity",
        from = "Column::DisruptionProfileId",
        to = "super::network::Column::Id"
    )]
    DisruptionProfile,
}

impl Related<super::experiment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Experiment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
