//! Bearer-token authorization: header parsing, token verification and
//! permission checks.

pub mod claims;
pub mod errors;
pub mod jwks;
pub mod verifier;

pub use claims::Claims;
pub use errors::AuthError;
pub use verifier::{from_config, JwksVerifier, SharedSecretVerifier, TokenVerifier};

pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
pub const POST_DRINKS: &str = "post:drinks";
pub const PATCH_DRINKS: &str = "patch:drinks";
pub const DELETE_DRINKS: &str = "delete:drinks";

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MissingHeader)?;
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        (Some(scheme), _, _) if !scheme.eq_ignore_ascii_case("bearer") => {
            Err(AuthError::InvalidHeader("authorization header must start with \"Bearer\"".into()))
        }
        (Some(_), None, _) => Err(AuthError::InvalidHeader("token not found".into())),
        _ => Err(AuthError::InvalidHeader("authorization header must be bearer token".into())),
    }
}

pub fn check_permission(claims: &Claims, permission: &str) -> Result<(), AuthError> {
    if claims.permissions.iter().any(|p| p == permission) {
        Ok(())
    } else {
        Err(AuthError::Forbidden(permission.to_string()))
    }
}
