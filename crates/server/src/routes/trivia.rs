use axum::extract::State;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use service::trivia::domain::{NewQuestion, QuizRequest};

use crate::errors::ApiError;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories))
        .route("/categories/:id/questions", get(category_questions))
        .route("/questions", get(questions).post(create_question))
        .route("/questions/:id", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .route("/quizzes", post(next_quiz_question))
}

#[utoipa::path(get, path = "/categories", tag = "trivia",
    responses((status = 200, description = "Category id to name", body = crate::openapi::CategoriesDoc)))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let categories = state.trivia.categories().await?;
    Ok(Json(json!({ "success": true, "categories": categories })))
}

#[utoipa::path(get, path = "/questions", tag = "trivia", params(PageQuery),
    responses(
        (status = 200, description = "One page of questions", body = crate::openapi::QuestionPageDoc),
        (status = 404, description = "Page is empty", body = crate::openapi::ErrorDoc)
    ))]
pub async fn questions(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    let page = state.trivia.questions_page(q.page.unwrap_or(1)).await?;
    let categories = state.trivia.categories().await?;
    Ok(Json(json!({
        "success": true,
        "total_questions": page.total_questions,
        "questions": page.questions,
        "categories": categories,
        "current_category": page.current_category,
    })))
}

#[utoipa::path(delete, path = "/questions/{id}", tag = "trivia",
    params(("id" = i32, Path, description = "Question id")),
    responses(
        (status = 200, description = "Deleted; total counted afterwards"),
        (status = 404, description = "No such question", body = crate::openapi::ErrorDoc)
    ))]
pub async fn delete_question(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<Value>, ApiError> {
    let (deleted, total) = state.trivia.delete(id).await?;
    Ok(Json(json!({ "success": true, "deleted": deleted, "total_questions": total })))
}

#[utoipa::path(post, path = "/questions", tag = "trivia",
    request_body = crate::openapi::NewQuestionDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Missing body or field", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Store rejected the question", body = crate::openapi::ErrorDoc)
    ))]
pub async fn create_question(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewQuestion>,
) -> Result<Json<Value>, ApiError> {
    let (created, total) = state.trivia.create(input).await?;
    Ok(Json(json!({ "success": true, "created": created.id, "total_questions": total })))
}

#[utoipa::path(post, path = "/questions/search", tag = "trivia",
    request_body = crate::openapi::SearchDoc,
    responses(
        (status = 200, description = "First page of matches", body = crate::openapi::QuestionPageDoc),
        (status = 404, description = "Nothing matched", body = crate::openapi::ErrorDoc)
    ))]
pub async fn search_questions(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SearchBody>,
) -> Result<Json<Value>, ApiError> {
    let term = body.search_term.ok_or_else(|| ApiError::bad_request("searchTerm required"))?;
    let page = state.trivia.search(&term).await?;
    Ok(Json(json!({
        "success": true,
        "questions": page.questions,
        "total_questions": page.total_questions,
        "current_category": page.current_category,
    })))
}

#[utoipa::path(get, path = "/categories/{id}/questions", tag = "trivia",
    params(("id" = i32, Path, description = "Category id"), PageQuery),
    responses(
        (status = 200, description = "One page of the category", body = crate::openapi::QuestionPageDoc),
        (status = 404, description = "Page is empty", body = crate::openapi::ErrorDoc)
    ))]
pub async fn category_questions(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    QueryParams(q): QueryParams<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    let page = state.trivia.questions_for_category(id, q.page.unwrap_or(1)).await?;
    Ok(Json(json!({
        "success": true,
        "questions": page.questions,
        "total_questions": page.total_questions,
        "current_category": page.current_category,
    })))
}

#[utoipa::path(post, path = "/quizzes", tag = "trivia",
    request_body = crate::openapi::QuizDoc,
    responses((status = 200, description = "Next question, null when none remain")))]
pub async fn next_quiz_question(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<QuizRequest>,
) -> Result<Json<Value>, ApiError> {
    let question = state.trivia.next_quiz_question(&req).await?;
    Ok(Json(json!({ "success": true, "question": question })))
}
