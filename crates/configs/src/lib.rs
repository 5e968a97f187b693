use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default)]
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4), log_json: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_true")]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_migrate: true,
        }
    }
}

/// Bearer-token verification settings.
///
/// With `domain` set, tokens are checked against the identity provider's
/// published key set. Without it, `jwt_secret` enables HS256 tokens signed
/// locally.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<String>,
    #[serde(default = "default_jwks_ttl")]
    pub jwks_cache_ttl_secs: u64,
    /// Minimum gap between key-set fetches forced by an unknown `kid`.
    #[serde(default = "default_jwks_min_refresh")]
    pub jwks_min_refresh_secs: u64,
    #[serde(default)]
    pub jwt_secret: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            domain: None,
            audience: None,
            algorithms: default_algorithms(),
            jwks_cache_ttl_secs: default_jwks_ttl(),
            jwks_min_refresh_secs: default_jwks_min_refresh(),
            jwt_secret: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self { Self { page_size: default_page_size() } }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_true() -> bool { true }
fn default_algorithms() -> Vec<String> { vec!["RS256".to_string()] }
fn default_jwks_ttl() -> u64 { 600 }
fn default_jwks_min_refresh() -> u64 { 30 }
fn default_page_size() -> u32 { 10 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults plus
    /// environment variables when the file is missing.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        self.pagination.validate()?;
        Ok(())
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.domain.is_none() {
            self.domain = std::env::var("AUTH0_DOMAIN").ok().filter(|d| !d.trim().is_empty());
        }
        if self.audience.is_none() {
            self.audience = std::env::var("API_AUDIENCE").ok().filter(|a| !a.trim().is_empty());
        }
        if self.jwt_secret.is_none() {
            self.jwt_secret = std::env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());
        }
        if let Some(domain) = self.domain.as_mut() {
            let trimmed = domain
                .trim()
                .trim_start_matches("https://")
                .trim_end_matches('/')
                .to_string();
            *domain = trimmed;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.domain.is_none() && self.jwt_secret.is_none() {
            return Err(anyhow!("auth needs either auth.domain (AUTH0_DOMAIN) or auth.jwt_secret (JWT_SECRET)"));
        }
        if self.algorithms.is_empty() {
            return Err(anyhow!("auth.algorithms must list at least one algorithm"));
        }
        if self.jwks_cache_ttl_secs == 0 {
            return Err(anyhow!("auth.jwks_cache_ttl_secs must be positive"));
        }
        Ok(())
    }

    /// Issuer expected in provider-issued tokens.
    pub fn issuer(&self) -> Option<String> {
        self.domain.as_ref().map(|d| format!("https://{}/", d))
    }

    pub fn jwks_url(&self) -> Option<String> {
        self.domain.as_ref().map(|d| format!("https://{}/.well-known/jwks.json", d))
    }
}

impl PaginationConfig {
    fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > 100 {
            return Err(anyhow!("pagination.page_size must be within 1..=100"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 5000
            log_json = true

            [database]
            url = "postgres://postgres@localhost:5432/trivia"
            max_connections = 5
            min_connections = 1

            [auth]
            domain = "fsnd.example.auth0.com"
            audience = "coffee"

            [pagination]
            page_size = 10
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert!(cfg.server.log_json);
        assert_eq!(cfg.database.max_connections, 5);
        assert!(cfg.database.auto_migrate);
        assert_eq!(cfg.auth.algorithms, vec!["RS256".to_string()]);
        assert_eq!(cfg.auth.jwks_min_refresh_secs, 30);
        assert_eq!(cfg.auth.issuer().as_deref(), Some("https://fsnd.example.auth0.com/"));
        assert_eq!(
            cfg.auth.jwks_url().as_deref(),
            Some("https://fsnd.example.auth0.com/.well-known/jwks.json")
        );
        assert_eq!(cfg.pagination.page_size, 10);
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.database.min_connections, 2);
        assert_eq!(cfg.pagination.page_size, 10);
        assert!(cfg.auth.domain.is_none());
    }

    #[test]
    fn database_validation_rejects_foreign_scheme() {
        let db = DatabaseConfig { url: "mysql://localhost/db".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_err());
        let db = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_ok());
    }

    #[test]
    fn database_validation_checks_pool_bounds() {
        let db = DatabaseConfig {
            url: "postgres://localhost/db".into(),
            min_connections: 5,
            max_connections: 2,
            ..DatabaseConfig::default()
        };
        assert!(db.validate().is_err());
    }

    #[test]
    fn auth_requires_domain_or_secret() {
        let auth = AuthConfig::default();
        assert!(auth.validate().is_err());
        let auth = AuthConfig { jwt_secret: Some("s".into()), ..AuthConfig::default() };
        assert!(auth.validate().is_ok());
    }

    #[test]
    fn page_size_out_of_range_is_rejected() {
        assert!(PaginationConfig { page_size: 0 }.validate().is_err());
        assert!(PaginationConfig { page_size: 101 }.validate().is_err());
        assert!(PaginationConfig { page_size: 25 }.validate().is_ok());
    }
}
