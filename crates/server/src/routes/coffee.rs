use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::routing::{get, MethodRouter};
use axum::{Json, Router};
use serde_json::{json, Value};

use service::coffee::domain::{DrinkPatch, NewDrink};
use service::gate::{DELETE_DRINKS, GET_DRINKS_DETAIL, PATCH_DRINKS, POST_DRINKS};

use crate::errors::ApiError;
use crate::extract::{JsonBody, PathParam};
use crate::middleware::{authenticate, authorize};
use crate::state::AppState;

/// Authenticate, then require `permission`, before `route` runs.
fn guarded(state: &AppState, permission: &'static str, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route
        .route_layer(middleware::from_fn(move |req: Request, next: Next| authorize(permission, req, next)))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
}

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/drinks", get(menu).merge(guarded(state, POST_DRINKS, axum::routing::post(create_drink))))
        .route("/drinks-detail", guarded(state, GET_DRINKS_DETAIL, get(details)))
        .route(
            "/drinks/:id",
            guarded(state, PATCH_DRINKS, axum::routing::patch(update_drink))
                .merge(guarded(state, DELETE_DRINKS, axum::routing::delete(delete_drink))),
        )
}

#[utoipa::path(get, path = "/drinks", tag = "coffee",
    responses((status = 200, description = "Menu with short recipes")))]
pub async fn menu(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let drinks = state.coffee.menu().await?;
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

#[utoipa::path(get, path = "/drinks-detail", tag = "coffee",
    security(("bearer" = ["get:drinks-detail"])),
    responses(
        (status = 200, description = "Drinks with full recipes"),
        (status = 401, description = "Gate rejected the request", body = crate::openapi::ErrorDoc)
    ))]
pub async fn details(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let drinks = state.coffee.details().await?;
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

#[utoipa::path(post, path = "/drinks", tag = "coffee",
    security(("bearer" = ["post:drinks"])),
    request_body = crate::openapi::NewDrinkDoc,
    responses(
        (status = 200, description = "Created drink in a one-element list"),
        (status = 401, description = "Gate rejected the request", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Duplicate title", body = crate::openapi::ErrorDoc)
    ))]
pub async fn create_drink(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewDrink>,
) -> Result<Json<Value>, ApiError> {
    let drink = state.coffee.create(input).await?;
    Ok(Json(json!({ "success": true, "drinks": [drink] })))
}

#[utoipa::path(patch, path = "/drinks/{id}", tag = "coffee",
    security(("bearer" = ["patch:drinks"])),
    params(("id" = i32, Path, description = "Drink id")),
    request_body = crate::openapi::NewDrinkDoc,
    responses(
        (status = 200, description = "Updated drink in a one-element list"),
        (status = 404, description = "No such drink", body = crate::openapi::ErrorDoc)
    ))]
pub async fn update_drink(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(patch): JsonBody<DrinkPatch>,
) -> Result<Json<Value>, ApiError> {
    let drink = state.coffee.update(id, patch).await?;
    Ok(Json(json!({ "success": true, "drinks": [drink] })))
}

#[utoipa::path(delete, path = "/drinks/{id}", tag = "coffee",
    security(("bearer" = ["delete:drinks"])),
    params(("id" = i32, Path, description = "Drink id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "No such drink", body = crate::openapi::ErrorDoc)
    ))]
pub async fn delete_drink(State(state): State<AppState>, PathParam(id): PathParam<i32>) -> Result<Json<Value>, ApiError> {
    let deleted = state.coffee.delete(id).await?;
    Ok(Json(json!({ "success": true, "delete": deleted })))
}
