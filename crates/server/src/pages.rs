//! Rendered HTML error pages for requests that never reach a JSON handler.

use std::any::Any;

use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, info};

fn page(status: StatusCode, heading: &str, detail: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{code} {heading}</title></head>\n\
         <body>\n<h1>{code}</h1>\n<h2>{heading}</h2>\n<p>{detail}</p>\n</body>\n</html>\n",
        code = status.as_u16(),
    ))
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> Response {
    info!(path = %uri.path(), "no route");
    (StatusCode::NOT_FOUND, page(StatusCode::NOT_FOUND, "Not Found", "The page you requested does not exist.")).into_response()
}

/// Response for a handler that panicked; the server keeps running.
pub fn internal_error(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!(panic = %detail, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        page(StatusCode::INTERNAL_SERVER_ERROR, "Server Error", "Something went wrong on our end."),
    )
        .into_response()
}
