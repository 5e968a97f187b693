use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use tracing::{info, instrument};

use models::{artist, errors::ModelError, show, venue};

use super::domain::{
    Area, Artist, ArtistDetail, ArtistForm, ArtistName, ArtistPatch, NewShow, Schedule, SearchResult, Show,
    ShowListing, Summary, Venue, VenueDetail, VenueForm,
};
use super::repository::{ArtistDraft, BookingRepository, ShowDraft, ShowScope, VenueDraft};
use crate::errors::ServiceError;
use crate::query::ListFilter;

/// Booking business service independent of web framework
pub struct BookingService<R: BookingRepository> {
    repo: Arc<R>,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    fn now() -> NaiveDateTime { Utc::now().naive_utc() }

    /// Upcoming show count per venue or artist id.
    async fn upcoming_counts(&self, by_venue: bool) -> Result<HashMap<i32, usize>, ServiceError> {
        let now = Self::now();
        let mut counts = HashMap::new();
        for s in self.repo.shows(ShowScope::All).await? {
            if s.is_upcoming(now) {
                let key = if by_venue { s.venue_id } else { s.artist_id };
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn venue_summaries(&self, venues: Vec<Venue>) -> Result<Vec<(Venue, Summary)>, ServiceError> {
        let counts = self.upcoming_counts(true).await?;
        Ok(venues
            .into_iter()
            .map(|v| {
                let summary = Summary { id: v.id, name: v.name.clone(), num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0) };
                (v, summary)
            })
            .collect())
    }

    /// Venues grouped by `(city, state)`, groups in that order.
    #[instrument(skip(self))]
    pub async fn areas(&self) -> Result<Vec<Area>, ServiceError> {
        let venues = self.repo.venues(ListFilter::All).await?;
        let mut groups: BTreeMap<(String, String), Vec<Summary>> = BTreeMap::new();
        for (v, summary) in self.venue_summaries(venues).await? {
            groups.entry((v.city, v.state)).or_default().push(summary);
        }
        Ok(groups
            .into_iter()
            .map(|((city, state), venues)| Area { city, state, venues })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn search_venues(&self, term: &str) -> Result<SearchResult, ServiceError> {
        let venues = self.repo.venues(ListFilter::Contains(venue::Column::Name, term.to_string())).await?;
        let data: Vec<Summary> = self.venue_summaries(venues).await?.into_iter().map(|(_, s)| s).collect();
        Ok(data.into())
    }

    #[instrument(skip(self))]
    pub async fn venue_detail(&self, id: i32) -> Result<VenueDetail, ServiceError> {
        let venue = self.repo.find_venue(id).await?.ok_or_else(|| ServiceError::not_found("venue"))?;
        let shows = self.repo.shows(ShowScope::Venue(id)).await?;
        Ok(VenueDetail { venue, schedule: Schedule::split(shows, Self::now()) })
    }

    #[instrument(skip(self, form))]
    pub async fn create_venue(&self, form: VenueForm) -> Result<Venue, ServiceError> {
        let draft = venue_draft(form)?;
        let created = self.repo.insert_venue(draft).await?;
        info!(venue_id = created.id, name = %created.name, "venue_created");
        Ok(created)
    }

    /// Full-field replacement of an existing venue.
    #[instrument(skip(self, form))]
    pub async fn replace_venue(&self, id: i32, form: VenueForm) -> Result<Venue, ServiceError> {
        let draft = venue_draft(form)?;
        let updated = self.repo.replace_venue(id, draft).await?.ok_or_else(|| ServiceError::not_found("venue"))?;
        info!(venue_id = id, "venue_updated");
        Ok(updated)
    }

    /// Fails with a constraint error while shows still reference the venue.
    #[instrument(skip(self))]
    pub async fn delete_venue(&self, id: i32) -> Result<i32, ServiceError> {
        if self.repo.find_venue(id).await?.is_none() {
            return Err(ServiceError::not_found("venue"));
        }
        if !self.repo.delete_venue(id).await? {
            return Err(ServiceError::not_found("venue"));
        }
        info!(venue_id = id, "venue_deleted");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn artists(&self) -> Result<Vec<ArtistName>, ServiceError> {
        let artists = self.repo.artists(ListFilter::All).await?;
        Ok(artists.into_iter().map(|a| ArtistName { id: a.id, name: a.name }).collect())
    }

    #[instrument(skip(self))]
    pub async fn search_artists(&self, term: &str) -> Result<SearchResult, ServiceError> {
        let artists = self.repo.artists(ListFilter::Contains(artist::Column::Name, term.to_string())).await?;
        let counts = self.upcoming_counts(false).await?;
        let data: Vec<Summary> = artists
            .into_iter()
            .map(|a| Summary { num_upcoming_shows: counts.get(&a.id).copied().unwrap_or(0), id: a.id, name: a.name })
            .collect();
        Ok(data.into())
    }

    #[instrument(skip(self))]
    pub async fn artist_detail(&self, id: i32) -> Result<ArtistDetail, ServiceError> {
        let artist = self.repo.find_artist(id).await?.ok_or_else(|| ServiceError::not_found("artist"))?;
        let shows = self.repo.shows(ShowScope::Artist(id)).await?;
        Ok(ArtistDetail { artist, schedule: Schedule::split(shows, Self::now()) })
    }

    #[instrument(skip(self, form))]
    pub async fn create_artist(&self, form: ArtistForm) -> Result<Artist, ServiceError> {
        let name = form.name.clone().ok_or_else(|| ModelError::required("name"))?;
        let city = form.city.clone().ok_or_else(|| ModelError::required("city"))?;
        let state = form.state.clone().ok_or_else(|| ModelError::required("state"))?;
        artist::validate(&name, &city, &state)?;
        let created = self.repo.insert_artist(ArtistDraft { name, city, state, form }).await?;
        info!(artist_id = created.id, name = %created.name, "artist_created");
        Ok(created)
    }

    /// Only supplied fields change.
    #[instrument(skip(self, patch))]
    pub async fn patch_artist(&self, id: i32, patch: ArtistPatch) -> Result<Artist, ServiceError> {
        for (field, value) in [("name", &patch.name), ("city", &patch.city), ("state", &patch.state)] {
            if let Some(v) = value {
                models::errors::require_text(field, v)?;
            }
        }
        let updated = self.repo.patch_artist(id, patch).await?.ok_or_else(|| ServiceError::not_found("artist"))?;
        info!(artist_id = id, "artist_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_artist(&self, id: i32) -> Result<i32, ServiceError> {
        if self.repo.find_artist(id).await?.is_none() {
            return Err(ServiceError::not_found("artist"));
        }
        if !self.repo.delete_artist(id).await? {
            return Err(ServiceError::not_found("artist"));
        }
        info!(artist_id = id, "artist_deleted");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn shows(&self) -> Result<Vec<ShowListing>, ServiceError> {
        self.repo.shows(ShowScope::All).await
    }

    /// Unknown artist or venue ids surface as a constraint error.
    #[instrument(skip(self, input))]
    pub async fn create_show(&self, input: NewShow) -> Result<Show, ServiceError> {
        let artist_id = input.artist_id.ok_or_else(|| ModelError::required("artist_id"))?;
        let venue_id = input.venue_id.ok_or_else(|| ModelError::required("venue_id"))?;
        let raw = input.start_time.ok_or_else(|| ModelError::required("start_time"))?;
        let start_time = show::normalize_start_time(&raw)?;
        let created = self.repo.insert_show(ShowDraft { artist_id, venue_id, start_time }).await?;
        info!(show_id = created.id, artist_id, venue_id, "show_created");
        Ok(created)
    }
}

fn venue_draft(form: VenueForm) -> Result<VenueDraft, ServiceError> {
    let name = form.name.clone().ok_or_else(|| ModelError::required("name"))?;
    let city = form.city.clone().ok_or_else(|| ModelError::required("city"))?;
    let state = form.state.clone().ok_or_else(|| ModelError::required("state"))?;
    venue::validate(&name, &city, &state)?;
    Ok(VenueDraft { name, city, state, form })
}
