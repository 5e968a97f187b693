use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use service::errors::ServiceError;
use service::gate::AuthError;

/// Failure envelope: `{"success": false, "error": <status>, "message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Gate rejections carry a stable reason code.
    pub code: Option<&'static str>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: u16,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), code: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }

    pub fn not_found() -> Self { Self::new(StatusCode::NOT_FOUND, "resource not found") }

    pub fn unprocessable() -> Self { Self::new(StatusCode::UNPROCESSABLE_ENTITY, "unprocessable") }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { success: false, error: self.status.as_u16(), message: &self.message, code: self.code };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => {
                warn!(error = %msg, "request rejected");
                ApiError::bad_request(msg)
            }
            ServiceError::Model(m) => {
                warn!(error = %m, "request rejected");
                ApiError::bad_request(m.to_string())
            }
            ServiceError::NotFound(msg) => {
                info!(reason = %msg, "not found");
                ApiError::not_found()
            }
            ServiceError::Constraint(msg) => {
                error!(error = %msg, kind = "constraint", "store rejected write");
                ApiError::unprocessable()
            }
            ServiceError::Unavailable(msg) => {
                error!(error = %msg, kind = "unavailable", "store unreachable");
                ApiError::unprocessable()
            }
            ServiceError::Db(msg) => {
                error!(error = %msg, kind = "db", "store failure");
                ApiError::unprocessable()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match &e {
            AuthError::KeysUnavailable(_) => error!(code = e.code(), error = %e, "token verification unavailable"),
            _ => warn!(code = e.code(), error = %e, "authorization rejected"),
        }
        Self { status: StatusCode::UNAUTHORIZED, message: e.to_string(), code: Some(e.code()) }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
