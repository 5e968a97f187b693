use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use thiserror::Error;

/// Reasons a request is turned away by the gate.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header is expected")]
    MissingHeader,
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("token expired")]
    TokenExpired,
    #[error("incorrect claims: {0}")]
    InvalidClaims(String),
    #[error("unable to parse authentication token: {0}")]
    InvalidToken(String),
    #[error("permission not found: {0}")]
    Forbidden(String),
    #[error("signing keys unavailable: {0}")]
    KeysUnavailable(String),
}

impl AuthError {
    /// Stable code string for responses and logs
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "authorization_header_missing",
            AuthError::InvalidHeader(_) => "invalid_header",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims(_) => "invalid_claims",
            AuthError::InvalidToken(_) => "invalid_token",
            AuthError::Forbidden(_) => "unauthorized",
            AuthError::KeysUnavailable(_) => "keys_unavailable",
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer | ErrorKind::MissingRequiredClaim(_) => {
                AuthError::InvalidClaims(e.to_string())
            }
            ErrorKind::InvalidAlgorithm => AuthError::InvalidHeader(e.to_string()),
            _ => AuthError::InvalidToken(e.to_string()),
        }
    }
}
