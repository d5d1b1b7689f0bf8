use proshop::constants::{DEFAULT_PORT, DEFAULT_PUBLIC_BASE_URL};
use proshop::{OriginAllowList, RuntimeMode, DEFAULT_PAYPAL_CLIENT_ID};
use std::env;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_ROOT: &str = ".";
const PRODUCTION_UPLOADS_DIR: &str = "/var/data/uploads";
const DEFAULT_JSON_BODY_LIMIT: usize = 1024 * 1024;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Development or production, from NODE_ENV
    pub mode: RuntimeMode,
    /// CORS allow-list (CORS_ALLOWED_ORIGINS, then FRONTEND_URL, then mode defaults)
    pub allowed_origins: OriginAllowList,
    /// Forwarded verbatim to the checkout page
    pub paypal_client_id: String,
    /// Database collaborator connection string (None = database-backed routes will fail)
    pub database_uri: Option<String>,
    /// Root for uploaded files served under /uploads
    pub uploads_dir: PathBuf,
    /// Compiled frontend bundle, served in production only
    pub spa_dir: PathBuf,
    /// Base URL the frontend derives its API endpoints from
    pub public_base_url: String,
    /// Max JSON / urlencoded body size in bytes
    pub json_body_limit: usize,
    /// Drain window for in-flight requests on shutdown
    pub shutdown_timeout_secs: u64,
    /// Bearer token required for /metrics (None = public)
    pub metrics_token: Option<String>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("mode", &self.mode)
            .field(
                "allowed_origins",
                &self.allowed_origins.iter().collect::<Vec<_>>(),
            )
            .field("paypal_client_id", &self.paypal_client_id)
            .field(
                "database_uri",
                &self.database_uri.as_ref().map(|_| "[REDACTED]"),
            )
            .field("uploads_dir", &self.uploads_dir)
            .field("spa_dir", &self.spa_dir)
            .field("public_base_url", &self.public_base_url)
            .field("json_body_limit", &self.json_body_limit)
            .field("shutdown_timeout_secs", &self.shutdown_timeout_secs)
            .field(
                "metrics_token",
                &self.metrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = RuntimeMode::from_node_env(var("NODE_ENV").as_deref());

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_var(&var, "PORT", DEFAULT_PORT)?;

        // CORS_ALLOWED_ORIGINS is authoritative; FRONTEND_URL is the older
        // single-origin convention.
        let cors_allowed = var("CORS_ALLOWED_ORIGINS");
        let frontend_url = var("FRONTEND_URL");
        let allowed_origins = OriginAllowList::load(
            [cors_allowed.as_deref(), frontend_url.as_deref()],
            mode.default_origins(),
        );

        let paypal_client_id =
            var("PAYPAL_CLIENT_ID").unwrap_or_else(|| DEFAULT_PAYPAL_CLIENT_ID.to_string());

        let database_uri = var("MONGO_URI");

        let server_root =
            PathBuf::from(var("SERVER_ROOT").unwrap_or_else(|| DEFAULT_SERVER_ROOT.to_string()));

        let uploads_dir = var("UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| match mode {
                RuntimeMode::Production => PathBuf::from(PRODUCTION_UPLOADS_DIR),
                RuntimeMode::Development => server_root.join("uploads"),
            });

        let spa_dir = var("SPA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| server_root.join("..").join("frontend").join("build"));

        let public_base_url =
            var("PUBLIC_BASE_URL").unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string());

        let json_body_limit = parse_var(&var, "JSON_BODY_LIMIT", DEFAULT_JSON_BODY_LIMIT)?;
        let shutdown_timeout_secs =
            parse_var(&var, "SHUTDOWN_TIMEOUT_SECS", DEFAULT_SHUTDOWN_TIMEOUT_SECS)?;

        let metrics_token = var("METRICS_TOKEN");

        if allowed_origins.is_empty() {
            tracing::warn!(
                "No CORS origins configured — every cross-origin browser request will be rejected. \
                 Set CORS_ALLOWED_ORIGINS to a comma-separated list of frontend origins."
            );
        } else if allowed_origins.is_default() {
            tracing::warn!(
                "CORS_ALLOWED_ORIGINS not set — falling back to development defaults: {:?}",
                allowed_origins.iter().collect::<Vec<_>>()
            );
        }

        if database_uri.is_none() {
            tracing::warn!("MONGO_URI not set — database-backed routes will fail");
        }

        if metrics_token.is_none() {
            tracing::warn!("METRICS_TOKEN not set — /metrics endpoint is publicly accessible");
        }

        Ok(Self {
            host,
            port,
            mode,
            allowed_origins,
            paypal_client_id,
            database_uri,
            uploads_dir,
            spa_dir,
            public_base_url,
            json_body_limit,
            shutdown_timeout_secs,
            metrics_token,
        })
    }

    /// Entry document of the production bundle.
    pub fn spa_index(&self) -> PathBuf {
        self.spa_dir.join("index.html")
    }
}

fn parse_var<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            var: key,
            value: raw,
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.mode, RuntimeMode::Development);
        assert_eq!(config.paypal_client_id, "sb");
        assert_eq!(config.uploads_dir, PathBuf::from("./uploads"));
        assert_eq!(config.spa_index(), PathBuf::from("./../frontend/build/index.html"));
        assert_eq!(config.json_body_limit, 1024 * 1024);
        assert_eq!(config.shutdown_timeout_secs, 30);
        assert!(config.allowed_origins.is_default());
        assert!(config.allowed_origins.contains("http://localhost:3000"));
    }

    #[test]
    fn test_production_defaults() {
        let config = config(&[("NODE_ENV", "production")]).unwrap();
        assert_eq!(config.mode, RuntimeMode::Production);
        assert_eq!(config.uploads_dir, PathBuf::from("/var/data/uploads"));
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_cors_allowed_origins_wins_over_frontend_url() {
        let config = config(&[
            ("CORS_ALLOWED_ORIGINS", "https://a.com/, https://b.com"),
            ("FRONTEND_URL", "https://legacy.example"),
        ])
        .unwrap();
        assert_eq!(
            config.allowed_origins.iter().collect::<Vec<_>>(),
            vec!["https://a.com", "https://b.com"]
        );
    }

    #[test]
    fn test_frontend_url_used_when_list_blank() {
        let config = config(&[
            ("CORS_ALLOWED_ORIGINS", "  "),
            ("FRONTEND_URL", "https://shop.example/"),
        ])
        .unwrap();
        assert_eq!(
            config.allowed_origins.iter().collect::<Vec<_>>(),
            vec!["https://shop.example"]
        );
        assert!(!config.allowed_origins.is_default());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("PAYPAL_CLIENT_ID", "live-client"),
            ("SERVER_ROOT", "/srv/proshop/backend"),
            ("UPLOADS_DIR", "/mnt/uploads"),
            ("JSON_BODY_LIMIT", "2048"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.paypal_client_id, "live-client");
        assert_eq!(config.uploads_dir, PathBuf::from("/mnt/uploads"));
        assert_eq!(
            config.spa_dir,
            PathBuf::from("/srv/proshop/backend/../frontend/build")
        );
        assert_eq!(config.json_body_limit, 2048);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: "PORT", .. }));
        assert_eq!(
            err.to_string(),
            "PORT must be a non-negative integer, got 'eighty'"
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = config(&[
            ("MONGO_URI", "mongodb://admin:hunter2@db:27017/proshop"),
            ("METRICS_TOKEN", "s3cret-token"),
        ])
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("s3cret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
