use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use service::booking::domain::{ArtistForm, ArtistPatch, NewShow, VenueForm};

use crate::errors::ApiError;
use crate::extract::{FormBody, PathParam};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/venues", get(venues).post(create_venue))
        .route("/venues/search", post(search_venues))
        .route("/venues/:id", get(venue).put(replace_venue).delete(delete_venue))
        .route("/artists", get(artists).post(create_artist))
        .route("/artists/search", post(search_artists))
        .route("/artists/:id", get(artist).patch(patch_artist).delete(delete_artist))
        .route("/shows", get(shows).post(create_show))
}

#[utoipa::path(get, path = "/venues", tag = "booking",
    responses((status = 200, description = "Venues grouped by city and state")))]
pub async fn venues(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let areas = state.booking.areas().await?;
    Ok(Json(json!({ "success": true, "areas": areas })))
}

#[utoipa::path(post, path = "/venues/search", tag = "booking",
    request_body(content = crate::openapi::SearchFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Venues whose name contains the term")))]
pub async fn search_venues(
    State(state): State<AppState>,
    FormBody(form): FormBody<SearchForm>,
) -> Result<Json<Value>, ApiError> {
    let found = state.booking.search_venues(&form.search_term).await?;
    Ok(Json(json!({ "success": true, "count": found.count, "data": found.data })))
}

#[utoipa::path(get, path = "/venues/{id}", tag = "booking",
    params(("id" = i32, Path, description = "Venue id")),
    responses(
        (status = 200, description = "Venue with past and upcoming shows"),
        (status = 404, description = "No such venue", body = crate::openapi::ErrorDoc)
    ))]
pub async fn venue(State(state): State<AppState>, PathParam(id): PathParam<i32>) -> Result<Json<Value>, ApiError> {
    let detail = state.booking.venue_detail(id).await?;
    Ok(Json(json!({ "success": true, "venue": detail })))
}

#[utoipa::path(post, path = "/venues", tag = "booking",
    request_body(content = crate::openapi::VenueFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Missing required field", body = crate::openapi::ErrorDoc)
    ))]
pub async fn create_venue(
    State(state): State<AppState>,
    FormBody(form): FormBody<VenueForm>,
) -> Result<Json<Value>, ApiError> {
    let venue = state.booking.create_venue(form).await?;
    Ok(Json(json!({ "success": true, "venue": venue })))
}

#[utoipa::path(put, path = "/venues/{id}", tag = "booking",
    params(("id" = i32, Path, description = "Venue id")),
    request_body(content = crate::openapi::VenueFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Replaced"),
        (status = 404, description = "No such venue", body = crate::openapi::ErrorDoc)
    ))]
pub async fn replace_venue(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    FormBody(form): FormBody<VenueForm>,
) -> Result<Json<Value>, ApiError> {
    let venue = state.booking.replace_venue(id, form).await?;
    Ok(Json(json!({ "success": true, "venue": venue })))
}

#[utoipa::path(delete, path = "/venues/{id}", tag = "booking",
    params(("id" = i32, Path, description = "Venue id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "No such venue", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Shows still reference the venue", body = crate::openapi::ErrorDoc)
    ))]
pub async fn delete_venue(State(state): State<AppState>, PathParam(id): PathParam<i32>) -> Result<Json<Value>, ApiError> {
    let deleted = state.booking.delete_venue(id).await?;
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}

#[utoipa::path(get, path = "/artists", tag = "booking",
    responses((status = 200, description = "Artist ids and names")))]
pub async fn artists(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let artists = state.booking.artists().await?;
    Ok(Json(json!({ "success": true, "artists": artists })))
}

#[utoipa::path(post, path = "/artists/search", tag = "booking",
    request_body(content = crate::openapi::SearchFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Artists whose name contains the term")))]
pub async fn search_artists(
    State(state): State<AppState>,
    FormBody(form): FormBody<SearchForm>,
) -> Result<Json<Value>, ApiError> {
    let found = state.booking.search_artists(&form.search_term).await?;
    Ok(Json(json!({ "success": true, "count": found.count, "data": found.data })))
}

#[utoipa::path(get, path = "/artists/{id}", tag = "booking",
    params(("id" = i32, Path, description = "Artist id")),
    responses(
        (status = 200, description = "Artist with past and upcoming shows"),
        (status = 404, description = "No such artist", body = crate::openapi::ErrorDoc)
    ))]
pub async fn artist(State(state): State<AppState>, PathParam(id): PathParam<i32>) -> Result<Json<Value>, ApiError> {
    let detail = state.booking.artist_detail(id).await?;
    Ok(Json(json!({ "success": true, "artist": detail })))
}

#[utoipa::path(post, path = "/artists", tag = "booking",
    request_body(content = crate::openapi::ArtistFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Missing required field", body = crate::openapi::ErrorDoc)
    ))]
pub async fn create_artist(
    State(state): State<AppState>,
    FormBody(form): FormBody<ArtistForm>,
) -> Result<Json<Value>, ApiError> {
    let artist = state.booking.create_artist(form).await?;
    Ok(Json(json!({ "success": true, "artist": artist })))
}

#[utoipa::path(patch, path = "/artists/{id}", tag = "booking",
    params(("id" = i32, Path, description = "Artist id")),
    request_body(content = crate::openapi::ArtistFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Supplied fields updated"),
        (status = 404, description = "No such artist", body = crate::openapi::ErrorDoc)
    ))]
pub async fn patch_artist(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    FormBody(patch): FormBody<ArtistPatch>,
) -> Result<Json<Value>, ApiError> {
    let artist = state.booking.patch_artist(id, patch).await?;
    Ok(Json(json!({ "success": true, "artist": artist })))
}

#[utoipa::path(delete, path = "/artists/{id}", tag = "booking",
    params(("id" = i32, Path, description = "Artist id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "No such artist", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Shows still reference the artist", body = crate::openapi::ErrorDoc)
    ))]
pub async fn delete_artist(State(state): State<AppState>, PathParam(id): PathParam<i32>) -> Result<Json<Value>, ApiError> {
    let deleted = state.booking.delete_artist(id).await?;
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}

#[utoipa::path(get, path = "/shows", tag = "booking",
    responses((status = 200, description = "Every show with venue and artist names")))]
pub async fn shows(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let shows = state.booking.shows().await?;
    Ok(Json(json!({ "success": true, "shows": shows })))
}

#[utoipa::path(post, path = "/shows", tag = "booking",
    request_body(content = crate::openapi::NewShowDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Created"),
        (status = 422, description = "Unknown artist or venue", body = crate::openapi::ErrorDoc)
    ))]
pub async fn create_show(
    State(state): State<AppState>,
    FormBody(input): FormBody<NewShow>,
) -> Result<Json<Value>, ApiError> {
    let show = state.booking.create_show(input).await?;
    Ok(Json(json!({ "success": true, "show": show })))
}
