use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use service::gate::{self, AuthError, Claims};

use crate::errors::ApiError;
use crate::state::AppState;

/// Verify the bearer token and attach its claims to the request.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let header = match req.headers().get(AUTHORIZATION) {
        Some(v) => Some(v.to_str().map_err(|_| AuthError::InvalidHeader("authorization header is not ASCII".into()))?),
        None => None,
    };
    let token = gate::extract_bearer(header)?;
    let claims = state.verifier.verify(token).await?;
    debug!(sub = ?claims.sub, "token verified");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Require `permission` in the claims left by [`authenticate`].
pub async fn authorize(permission: &'static str, req: Request, next: Next) -> Result<Response, ApiError> {
    let claims = req.extensions().get::<Claims>().ok_or(AuthError::MissingHeader)?;
    gate::check_permission(claims, permission)?;
    Ok(next.run(req).await)
}
