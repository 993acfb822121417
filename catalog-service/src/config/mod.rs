use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "global_mobility-apex-ecommerce";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// May carry credentials; log `redacted_uri()` instead.
    pub uri: Secret<String>,
    pub database: String,
    /// Bound on connect plus the initial ping.
    pub connect_timeout: Duration,
    /// Bound on each point lookup.
    pub query_timeout: Duration,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: Secret::new(DEFAULT_MONGODB_URI.to_string()),
            database: DEFAULT_DATABASE.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            query_timeout: Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SECS),
        }
    }
}

impl MongoConfig {
    pub fn redacted_uri(&self) -> String {
        redact_credentials(self.uri.expose_secret())
    }
}

/// Replaces the `user:password@` part of a connection string with `***@`.
/// Anything that does not look like `scheme://...` is hidden entirely.
fn redact_credentials(uri: &str) -> String {
    let Some((scheme, rest)) = uri.split_once("://") else {
        return "<redacted>".to_string();
    };

    let authority_end = rest.find(|c| c == '/' || c == '?').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}://***@{}", scheme, &rest[at + 1..]),
        None => uri.to_string(),
    }
}

impl CatalogConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(CatalogConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: Secret::new(get_env(
                    "MONGODB_URI",
                    Some(DEFAULT_MONGODB_URI),
                    is_prod,
                )?),
                database: get_env("MONGODB_DATABASE", Some(DEFAULT_DATABASE), is_prod)?,
                connect_timeout: parse_secs(
                    "MONGODB_CONNECT_TIMEOUT_SECS",
                    env::var("MONGODB_CONNECT_TIMEOUT_SECS").ok(),
                    DEFAULT_CONNECT_TIMEOUT_SECS,
                )?,
                query_timeout: parse_secs(
                    "MONGODB_QUERY_TIMEOUT_SECS",
                    env::var("MONGODB_QUERY_TIMEOUT_SECS").ok(),
                    DEFAULT_QUERY_TIMEOUT_SECS,
                )?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_secs(key: &str, raw: Option<String>, default: u64) -> Result<Duration, AppError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(default));
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be a positive number of seconds, got '{}'",
            key,
            raw
        ))),
    }
}
