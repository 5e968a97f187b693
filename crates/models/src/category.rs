use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "type")]
    pub kind: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Questions }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Questions => Entity::has_many(crate::question::Entity).into(),
        }
    }
}

impl Related<crate::question::Entity> for Entity {
    fn to() -> RelationDef { Relation::Questions.def() }
}

impl ActiveModelBehavior for ActiveModel {}
