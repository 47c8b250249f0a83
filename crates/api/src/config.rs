//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_ADDR '{value}' is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// Postgres URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Base for self links (`url` fields). Falls back to the Host header.
    pub public_url: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_raw.clone(),
                source,
            })?;

        Ok(Self {
            bind_addr,
            jwt_secret: get("JWT_SECRET").unwrap_or_else(|| DEV_JWT_SECRET.to_string()),
            database_url: get("DATABASE_URL"),
            public_url: get("PUBLIC_URL").map(|u| u.trim_end_matches('/').to_string()),
        })
    }

    pub fn jwt_secret_is_default(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert!(cfg.jwt_secret_is_default());
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.public_url, None);
    }

    #[test]
    fn reads_overrides_and_normalizes_public_url() {
        let cfg = load(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("JWT_SECRET", "prod"),
            ("DATABASE_URL", "postgres://localhost/park"),
            ("PUBLIC_URL", "https://api.kennywood.test/"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr.port(), 9000);
        assert!(!cfg.jwt_secret_is_default());
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/park"));
        assert_eq!(cfg.public_url.as_deref(), Some("https://api.kennywood.test"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = load(&[("DATABASE_URL", "  "), ("PUBLIC_URL", "")]).unwrap();
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.public_url, None);
    }

    #[test]
    fn rejects_bad_bind_addr() {
        let err = load(&[("BIND_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    }
}
