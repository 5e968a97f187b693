use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, IntoActiveModel, JoinType,
    QueryFilter, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use models::{artist, show, venue};

use super::domain::{parse_flag, Artist, ArtistForm, ArtistPatch, Show, ShowListing, Venue, VenueForm};
use crate::errors::ServiceError;
use crate::query::{self, ListFilter};

/// Which shows to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowScope {
    All,
    Venue(i32),
    Artist(i32),
}

/// Venue fields after validation.
#[derive(Debug, Clone)]
pub struct VenueDraft {
    pub name: String,
    pub city: String,
    pub state: String,
    pub form: VenueForm,
}

#[derive(Debug, Clone)]
pub struct ArtistDraft {
    pub name: String,
    pub city: String,
    pub state: String,
    pub form: ArtistForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowDraft {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: String,
}

/// Persistence for venues, artists and shows.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn venues(&self, filter: ListFilter<venue::Column>) -> Result<Vec<Venue>, ServiceError>;
    async fn find_venue(&self, id: i32) -> Result<Option<Venue>, ServiceError>;
    async fn insert_venue(&self, draft: VenueDraft) -> Result<Venue, ServiceError>;
    /// Replace every field; `None` when the venue does not exist.
    async fn replace_venue(&self, id: i32, draft: VenueDraft) -> Result<Option<Venue>, ServiceError>;
    async fn delete_venue(&self, id: i32) -> Result<bool, ServiceError>;

    async fn artists(&self, filter: ListFilter<artist::Column>) -> Result<Vec<Artist>, ServiceError>;
    async fn find_artist(&self, id: i32) -> Result<Option<Artist>, ServiceError>;
    async fn insert_artist(&self, draft: ArtistDraft) -> Result<Artist, ServiceError>;
    async fn patch_artist(&self, id: i32, patch: ArtistPatch) -> Result<Option<Artist>, ServiceError>;
    async fn delete_artist(&self, id: i32) -> Result<bool, ServiceError>;

    async fn shows(&self, scope: ShowScope) -> Result<Vec<ShowListing>, ServiceError>;
    async fn insert_show(&self, draft: ShowDraft) -> Result<Show, ServiceError>;
}

pub struct SeaOrmBookingRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[derive(Debug, FromQueryResult)]
struct ShowRow {
    venue_id: i32,
    venue_name: String,
    venue_image_link: Option<String>,
    artist_id: i32,
    artist_name: String,
    artist_image_link: Option<String>,
    start_time: String,
}

impl From<ShowRow> for ShowListing {
    fn from(r: ShowRow) -> Self {
        Self {
            venue_id: r.venue_id,
            venue_name: r.venue_name,
            venue_image_link: r.venue_image_link,
            artist_id: r.artist_id,
            artist_name: r.artist_name,
            artist_image_link: r.artist_image_link,
            start_time: r.start_time,
        }
    }
}

fn venue_active_model(draft: VenueDraft) -> venue::ActiveModel {
    let f = draft.form;
    venue::ActiveModel {
        name: Set(draft.name),
        city: Set(draft.city),
        state: Set(draft.state),
        address: Set(f.address),
        phone: Set(f.phone),
        genres: Set(venue::join_genres(&f.genres)),
        image_link: Set(f.image_link),
        website: Set(f.website),
        facebook_link: Set(f.facebook_link),
        seeking_talent: Set(f.seeking_talent.as_deref().map(parse_flag).unwrap_or(false)),
        seeking_description: Set(f.seeking_description),
        ..Default::default()
    }
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn venues(&self, filter: ListFilter<venue::Column>) -> Result<Vec<Venue>, ServiceError> {
        let res = query::list::<venue::Entity, _>(&self.db, &filter, None).await?;
        Ok(res.items.into_iter().map(Venue::from).collect())
    }

    async fn find_venue(&self, id: i32) -> Result<Option<Venue>, ServiceError> {
        Ok(venue::Entity::find_by_id(id).one(&self.db).await?.map(Venue::from))
    }

    async fn insert_venue(&self, draft: VenueDraft) -> Result<Venue, ServiceError> {
        let txn = self.db.begin().await?;
        let created = venue_active_model(draft).insert(&txn).await?;
        txn.commit().await?;
        Ok(created.into())
    }

    async fn replace_venue(&self, id: i32, draft: VenueDraft) -> Result<Option<Venue>, ServiceError> {
        let txn = self.db.begin().await?;
        if venue::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(None);
        }
        let mut am = venue_active_model(draft);
        am.id = Set(id);
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        Ok(Some(updated.into()))
    }

    async fn delete_venue(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        let res = venue::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }

    async fn artists(&self, filter: ListFilter<artist::Column>) -> Result<Vec<Artist>, ServiceError> {
        let res = query::list::<artist::Entity, _>(&self.db, &filter, None).await?;
        Ok(res.items.into_iter().map(Artist::from).collect())
    }

    async fn find_artist(&self, id: i32) -> Result<Option<Artist>, ServiceError> {
        Ok(artist::Entity::find_by_id(id).one(&self.db).await?.map(Artist::from))
    }

    async fn insert_artist(&self, draft: ArtistDraft) -> Result<Artist, ServiceError> {
        let f = draft.form;
        let am = artist::ActiveModel {
            name: Set(draft.name),
            city: Set(draft.city),
            state: Set(draft.state),
            phone: Set(f.phone),
            genres: Set(venue::join_genres(&f.genres)),
            website: Set(f.website),
            image_link: Set(f.image_link),
            facebook_link: Set(f.facebook_link),
            seeking_venue: Set(f.seeking_venue.as_deref().map(parse_flag).unwrap_or(false)),
            seeking_description: Set(f.seeking_description),
            ..Default::default()
        };
        let txn = self.db.begin().await?;
        let created = am.insert(&txn).await?;
        txn.commit().await?;
        Ok(created.into())
    }

    async fn patch_artist(&self, id: i32, patch: ArtistPatch) -> Result<Option<Artist>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(found) = artist::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };
        let mut am = found.into_active_model();
        if let Some(v) = patch.name { am.name = Set(v); }
        if let Some(v) = patch.city { am.city = Set(v); }
        if let Some(v) = patch.state { am.state = Set(v); }
        if let Some(v) = patch.phone { am.phone = Set(Some(v)); }
        if !patch.genres.is_empty() { am.genres = Set(venue::join_genres(&patch.genres)); }
        if let Some(v) = patch.website { am.website = Set(Some(v)); }
        if let Some(v) = patch.image_link { am.image_link = Set(Some(v)); }
        if let Some(v) = patch.facebook_link { am.facebook_link = Set(Some(v)); }
        if let Some(v) = patch.seeking_venue { am.seeking_venue = Set(parse_flag(&v)); }
        if let Some(v) = patch.seeking_description { am.seeking_description = Set(Some(v)); }
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        Ok(Some(updated.into()))
    }

    async fn delete_artist(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        let res = artist::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }

    async fn shows(&self, scope: ShowScope) -> Result<Vec<ShowListing>, ServiceError> {
        let mut select = show::Entity::find()
            .select_only()
            .column(show::Column::VenueId)
            .column_as(venue::Column::Name, "venue_name")
            .column_as(venue::Column::ImageLink, "venue_image_link")
            .column(show::Column::ArtistId)
            .column_as(artist::Column::Name, "artist_name")
            .column_as(artist::Column::ImageLink, "artist_image_link")
            .column(show::Column::StartTime)
            .join(JoinType::InnerJoin, show::Relation::Venue.def())
            .join(JoinType::InnerJoin, show::Relation::Artist.def());
        select = match scope {
            ShowScope::All => select,
            ShowScope::Venue(id) => select.filter(show::Column::VenueId.eq(id)),
            ShowScope::Artist(id) => select.filter(show::Column::ArtistId.eq(id)),
        };
        let rows = select.into_model::<ShowRow>().all(&self.db).await?;
        Ok(rows.into_iter().map(ShowListing::from).collect())
    }

    async fn insert_show(&self, draft: ShowDraft) -> Result<Show, ServiceError> {
        let am = show::ActiveModel {
            artist_id: Set(draft.artist_id),
            venue_id: Set(draft.venue_id),
            start_time: Set(draft.start_time),
            ..Default::default()
        };
        let txn = self.db.begin().await?;
        let created = am.insert(&txn).await?;
        txn.commit().await?;
        Ok(created.into())
    }
}
