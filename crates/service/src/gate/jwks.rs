use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use moka::future::Cache;
use tracing::{debug, warn};

use super::errors::AuthError;

/// Where verification keys come from.
#[async_trait]
pub trait KeySource: Send + Sync {
    /// Current key set; `refresh` bypasses any cache.
    async fn key_set(&self, refresh: bool) -> Result<Arc<JwkSet>, AuthError>;
}

/// Key set published by an identity provider, cached for a fixed TTL.
///
/// Forced refreshes are served from the cache while the last fetch is younger
/// than the minimum refresh interval.
pub struct RemoteJwks {
    url: String,
    client: reqwest::Client,
    cache: Cache<String, Arc<JwkSet>>,
    recently_fetched: Option<Cache<String, ()>>,
}

impl RemoteJwks {
    pub fn new(url: impl Into<String>, ttl: Duration) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            cache: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            recently_fetched: None,
        }
    }

    /// Zero disables the limit.
    pub fn with_min_refresh(mut self, interval: Duration) -> Self {
        self.recently_fetched = (!interval.is_zero())
            .then(|| Cache::builder().max_capacity(1).time_to_live(interval).build());
        self
    }

    fn refresh_allowed(&self) -> bool {
        match &self.recently_fetched {
            Some(marks) => !marks.contains_key(&self.url),
            None => true,
        }
    }

    async fn fetch(&self) -> Result<Arc<JwkSet>, AuthError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(url = %self.url, err = %e, "jwks fetch failed");
                AuthError::KeysUnavailable(e.to_string())
            })?;
        let set: JwkSet = resp.json().await.map_err(|e| AuthError::KeysUnavailable(e.to_string()))?;
        debug!(url = %self.url, keys = set.keys.len(), "jwks fetched");
        Ok(Arc::new(set))
    }
}

#[async_trait]
impl KeySource for RemoteJwks {
    async fn key_set(&self, refresh: bool) -> Result<Arc<JwkSet>, AuthError> {
        if let Some(set) = self.cache.get(&self.url).await {
            if !refresh {
                return Ok(set);
            }
            if !self.refresh_allowed() {
                debug!(url = %self.url, "jwks refresh skipped, fetched recently");
                return Ok(set);
            }
        }
        let set = self.fetch().await?;
        self.cache.insert(self.url.clone(), set.clone()).await;
        if let Some(marks) = &self.recently_fetched {
            marks.insert(self.url.clone(), ()).await;
        }
        Ok(set)
    }
}

/// Fixed key set, for tests and offline setups.
pub struct StaticJwks(pub Arc<JwkSet>);

#[async_trait]
impl KeySource for StaticJwks {
    async fn key_set(&self, _refresh: bool) -> Result<Arc<JwkSet>, AuthError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Local JWKS endpoint; returns its URL and a fetch counter.
    async fn serve_jwks() -> anyhow::Result<(String, Arc<AtomicUsize>)> {
        let fetches = Arc::new(AtomicUsize::new(0));
        let counter = fetches.clone();
        let body = serde_json::json!({
            "keys": [{ "kty": "oct", "kid": "k1", "alg": "HS256", "k": "c2VjcmV0" }]
        });
        let app = Router::new().route(
            "/.well-known/jwks.json",
            get(move || {
                let counter = counter.clone();
                let body = body.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(body)
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok((format!("http://{addr}/.well-known/jwks.json"), fetches))
    }

    #[tokio::test]
    async fn cached_set_is_reused_until_ttl_expires() -> anyhow::Result<()> {
        let (url, fetches) = serve_jwks().await?;
        let jwks = RemoteJwks::new(url, Duration::from_millis(200));

        let set = jwks.key_set(false).await?;
        assert!(set.find("k1").is_some());
        jwks.key_set(false).await?;
        assert_eq!(fetches.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(400)).await;
        jwks.key_set(false).await?;
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn forced_refresh_waits_for_min_interval() -> anyhow::Result<()> {
        let (url, fetches) = serve_jwks().await?;
        let jwks = RemoteJwks::new(url, Duration::from_secs(60)).with_min_refresh(Duration::from_secs(60));

        jwks.key_set(false).await?;
        for _ in 0..5 {
            let set = jwks.key_set(true).await?;
            assert!(set.find("k1").is_some());
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test]
    async fn forced_refresh_fetches_without_limit() -> anyhow::Result<()> {
        let (url, fetches) = serve_jwks().await?;
        let jwks = RemoteJwks::new(url, Duration::from_secs(60)).with_min_refresh(Duration::ZERO);

        jwks.key_set(false).await?;
        jwks.key_set(true).await?;
        jwks.key_set(false).await?;
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_provider_is_keys_unavailable() {
        let jwks = RemoteJwks::new("http://127.0.0.1:9/.well-known/jwks.json", Duration::from_secs(60));
        assert!(matches!(jwks.key_set(false).await, Err(AuthError::KeysUnavailable(_))));
    }
}
