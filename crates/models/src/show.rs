use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Canonical storage format for `start_time`.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED_FORMATS: [&str; 3] = [START_TIME_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Artist, Venue }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Artist => Entity::belongs_to(crate::artist::Entity)
                .from(Column::ArtistId)
                .to(crate::artist::Column::Id)
                .into(),
            Relation::Venue => Entity::belongs_to(crate::venue::Entity)
                .from(Column::VenueId)
                .to(crate::venue::Column::Id)
                .into(),
        }
    }
}

impl Related<crate::artist::Entity> for Entity {
    fn to() -> RelationDef { Relation::Artist.def() }
}

impl Related<crate::venue::Entity> for Entity {
    fn to() -> RelationDef { Relation::Venue.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Parse a stored or submitted start time.
pub fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Validate a submitted start time and rewrite it in the canonical format.
pub fn normalize_start_time(value: &str) -> Result<String, ModelError> {
    parse_start_time(value)
        .map(|t| t.format(START_TIME_FORMAT).to_string())
        .ok_or_else(|| ModelError::Validation(format!("start_time must look like 2024-05-01 20:00:00, got '{}'", value)))
}
