use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{require_text, ModelError};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "venue")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub genres: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Shows }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Shows => Entity::has_many(crate::show::Entity).into(),
        }
    }
}

impl Related<crate::show::Entity> for Entity {
    fn to() -> RelationDef { Relation::Shows.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Name, city and state identify a venue on the listing page.
pub fn validate(name: &str, city: &str, state: &str) -> Result<(), ModelError> {
    require_text("name", name)?;
    require_text("city", city)?;
    require_text("state", state)?;
    Ok(())
}

/// Genres are stored comma-joined, without normalisation.
pub fn join_genres(genres: &[String]) -> Option<String> {
    if genres.is_empty() {
        return None;
    }
    Some(genres.join(","))
}

pub fn split_genres(stored: Option<&str>) -> Vec<String> {
    match stored {
        Some(s) if !s.is_empty() => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}
