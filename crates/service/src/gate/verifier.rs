use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tracing::{debug, info};

use super::claims::Claims;
use super::errors::AuthError;
use super::jwks::{KeySource, RemoteJwks};

/// Checks a bearer token and returns its claims.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

fn base_validation(alg: Algorithm, audience: Option<&str>, issuer: Option<&str>) -> Validation {
    let mut validation = Validation::new(alg);
    match audience {
        Some(aud) => validation.set_audience(&[aud]),
        None => validation.validate_aud = false,
    }
    if let Some(iss) = issuer {
        validation.set_issuer(&[iss]);
    }
    validation
}

/// HS256 tokens signed with a locally configured secret.
pub struct SharedSecretVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl SharedSecretVerifier {
    pub fn new(secret: &str, audience: Option<&str>) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: base_validation(Algorithm::HS256, audience, None),
        }
    }
}

#[async_trait]
impl TokenVerifier for SharedSecretVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}

/// Tokens issued by an identity provider and signed with one of the keys in
/// its published key set.
pub struct JwksVerifier<K: KeySource> {
    keys: K,
    algorithms: Vec<Algorithm>,
    audience: Option<String>,
    issuer: Option<String>,
}

impl<K: KeySource> JwksVerifier<K> {
    pub fn new(keys: K, algorithms: Vec<Algorithm>, audience: Option<String>, issuer: Option<String>) -> Self {
        Self { keys, algorithms, audience, issuer }
    }
}

#[async_trait]
impl<K: KeySource> TokenVerifier for JwksVerifier<K> {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::InvalidHeader(e.to_string()))?;
        if !self.algorithms.contains(&header.alg) {
            return Err(AuthError::InvalidHeader(format!("algorithm {:?} not allowed", header.alg)));
        }
        let kid = header.kid.ok_or_else(|| AuthError::InvalidHeader("authorization malformed: no kid".into()))?;

        let cached = self.keys.key_set(false).await?;
        let jwk = match cached.find(&kid) {
            Some(jwk) => jwk.clone(),
            None => {
                // Unknown kid: the provider may have rotated its keys.
                debug!(kid = %kid, "kid not in cached key set, refetching");
                let fresh = self.keys.key_set(true).await?;
                fresh
                    .find(&kid)
                    .cloned()
                    .ok_or_else(|| AuthError::InvalidHeader("unable to find the appropriate key".into()))?
            }
        };

        let key = DecodingKey::from_jwk(&jwk).map_err(|e| AuthError::InvalidHeader(e.to_string()))?;
        let validation = base_validation(header.alg, self.audience.as_deref(), self.issuer.as_deref());
        let data = decode::<Claims>(token, &key, &validation)?;
        Ok(data.claims)
    }
}

/// Provider key set when a domain is configured, shared secret otherwise.
pub fn from_config(cfg: &configs::AuthConfig) -> Result<Arc<dyn TokenVerifier>, AuthError> {
    if let (Some(url), Some(issuer)) = (cfg.jwks_url(), cfg.issuer()) {
        let algorithms = cfg
            .algorithms
            .iter()
            .map(|a| Algorithm::from_str(a).map_err(|_| AuthError::InvalidHeader(format!("unknown algorithm {}", a))))
            .collect::<Result<Vec<_>, _>>()?;
        info!(jwks = %url, issuer = %issuer, "verifying tokens against provider key set");
        let keys = RemoteJwks::new(url, Duration::from_secs(cfg.jwks_cache_ttl_secs))
            .with_min_refresh(Duration::from_secs(cfg.jwks_min_refresh_secs));
        return Ok(Arc::new(JwksVerifier::new(keys, algorithms, cfg.audience.clone(), Some(issuer))));
    }
    match cfg.jwt_secret.as_deref() {
        Some(secret) => {
            info!("verifying HS256 tokens with the configured secret");
            Ok(Arc::new(SharedSecretVerifier::new(secret, cfg.audience.as_deref())))
        }
        None => Err(AuthError::KeysUnavailable("neither auth.domain nor auth.jwt_secret configured".into())),
    }
}
