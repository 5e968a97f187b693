use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use models::{artist, show, venue};

/// Checkbox values a browser form may send for "on".
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "on" | "true" | "1")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<venue::Model> for Venue {
    fn from(m: venue::Model) -> Self {
        Self {
            genres: venue::split_genres(m.genres.as_deref()),
            id: m.id,
            name: m.name,
            city: m.city,
            state: m.state,
            address: m.address,
            phone: m.phone,
            image_link: m.image_link,
            website: m.website,
            facebook_link: m.facebook_link,
            seeking_talent: m.seeking_talent,
            seeking_description: m.seeking_description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl From<artist::Model> for Artist {
    fn from(m: artist::Model) -> Self {
        Self {
            genres: venue::split_genres(m.genres.as_deref()),
            id: m.id,
            name: m.name,
            city: m.city,
            state: m.state,
            phone: m.phone,
            website: m.website,
            image_link: m.image_link,
            facebook_link: m.facebook_link,
            seeking_venue: m.seeking_venue,
            seeking_description: m.seeking_description,
        }
    }
}

/// Submitted venue form. `name`, `city` and `state` are required; the rest
/// are stored as given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

/// Partial artist update: absent fields keep their stored value. An empty
/// `genres` list leaves genres unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistPatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewShow {
    pub artist_id: Option<i32>,
    pub venue_id: Option<i32>,
    pub start_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Show {
    pub id: i32,
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: String,
}

impl From<show::Model> for Show {
    fn from(m: show::Model) -> Self {
        Self { id: m.id, artist_id: m.artist_id, venue_id: m.venue_id, start_time: m.start_time }
    }
}

/// A show joined with its venue and artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    #[serde(skip)]
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl ShowListing {
    /// Shows whose start time cannot be parsed count as past.
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        show::parse_start_time(&self.start_time).map(|t| t > now).unwrap_or(false)
    }
}

/// Show as listed on a venue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// Show as listed on an artist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowListing> for ArtistShow {
    fn from(s: ShowListing) -> Self {
        Self { artist_id: s.artist_id, artist_name: s.artist_name, artist_image_link: s.artist_image_link, start_time: s.start_time }
    }
}

impl From<ShowListing> for VenueShow {
    fn from(s: ShowListing) -> Self {
        Self { venue_id: s.venue_id, venue_name: s.venue_name, venue_image_link: s.venue_image_link, start_time: s.start_time }
    }
}

/// Shows split at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T: From<ShowListing>> Schedule<T> {
    pub fn split(shows: Vec<ShowListing>, now: NaiveDateTime) -> Self {
        let (upcoming, past): (Vec<_>, Vec<_>) = shows.into_iter().partition(|s| s.is_upcoming(now));
        Self {
            past_shows_count: past.len(),
            upcoming_shows_count: upcoming.len(),
            past_shows: past.into_iter().map(T::from).collect(),
            upcoming_shows: upcoming.into_iter().map(T::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub schedule: Schedule<ArtistShow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(flatten)]
    pub schedule: Schedule<VenueShow>,
}

/// Venue or artist entry in listings and search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistName {
    pub id: i32,
    pub name: String,
}

/// Venues sharing one `(city, state)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<Summary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub count: usize,
    pub data: Vec<Summary>,
}

impl From<Vec<Summary>> for SearchResult {
    fn from(data: Vec<Summary>) -> Self { Self { count: data.len(), data } }
}
