//! Runtime configuration read from the environment (after `.env` is loaded).

use crate::error::ConfigError;
use std::env;

/// Browser origins allowed to make credentialed cross-origin requests by default.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:8000", "http://localhost:8080"];

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub jwt_expires_secs: i64,
    pub body_limit_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            database_url: "postgres://localhost/carsharing".into(),
            max_connections: 5,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            jwt_secret: "development-secret-change-me".into(),
            jwt_expires_secs: 60 * 60,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => parse_origins(&raw),
            None => defaults.cors_origins,
        };
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", lookup("PORT"), defaults.port)?,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                lookup("DATABASE_MAX_CONNECTIONS"),
                defaults.max_connections,
            )?,
            cors_origins,
            jwt_secret: lookup("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expires_secs: parse_or(
                "JWT_EXPIRES_SECS",
                lookup("JWT_EXPIRES_SECS"),
                defaults.jwt_expires_secs,
            )?,
            body_limit_bytes: parse_or(
                "BODY_LIMIT_BYTES",
                lookup("BODY_LIMIT_BYTES"),
                defaults.body_limit_bytes,
            )?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
