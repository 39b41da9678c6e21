//! Encoder catalog entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "encoders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub encoder_type: Option<String>,
    pub comment: Option<String>,
    pub scalable: bool,
    pub layer_count: Option<i32>,
    pub path: Option<String>,
    pub filename: Option<String>,
    pub mode_file_required: bool,
    pub seq_file_required: bool,
    pub layers_file_required: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
