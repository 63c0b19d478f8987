//! Process Configuration
//!
//! Read once from the environment at startup. Debug builds fall back to
//! development defaults; release builds insist on a real session secret.

use std::time::Duration;

use auth::AuthConfig;
use auth::config::MAX_SESSION_TTL;
use platform::crypto::{decode_secret, random_secret};
use platform::password::PasswordPolicy;
use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:8080,http://127.0.0.1:8080";
const DEFAULT_SESSION_TTL_SECS: u64 = 12 * 3600;
const DEFAULT_SESSION_SWEEP_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub session_sweep_period: Duration,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load(lookup, cfg!(debug_assertions))
    }

    fn load<F>(lookup: F, development: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            var("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                reason: "must be at least 1".to_string(),
            });
        }

        let port = parse_or("PORT", var("PORT"), DEFAULT_PORT)?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let session_secret = match var("SESSION_SECRET") {
            Some(encoded) => decode_secret(&encoded).map_err(|e| ConfigError::Invalid {
                name: "SESSION_SECRET",
                reason: e.to_string(),
            })?,
            None if development => {
                tracing::warn!("SESSION_SECRET not set, using a random secret");
                random_secret()
            }
            None => return Err(ConfigError::Missing("SESSION_SECRET")),
        };

        let cookie_secure = parse_or("COOKIE_SECURE", var("COOKIE_SECURE"), !development)?;

        let session_ttl_secs = parse_or(
            "SESSION_TTL_SECS",
            var("SESSION_TTL_SECS"),
            DEFAULT_SESSION_TTL_SECS,
        )?;
        let session_sweep_secs = parse_or(
            "SESSION_SWEEP_SECS",
            var("SESSION_SWEEP_SECS"),
            DEFAULT_SESSION_SWEEP_SECS,
        )?;
        if session_ttl_secs == 0 || session_sweep_secs == 0 {
            return Err(ConfigError::Invalid {
                name: if session_ttl_secs == 0 {
                    "SESSION_TTL_SECS"
                } else {
                    "SESSION_SWEEP_SECS"
                },
                reason: "must be at least 1".to_string(),
            });
        }
        if session_ttl_secs > MAX_SESSION_TTL.as_secs() {
            return Err(ConfigError::Invalid {
                name: "SESSION_TTL_SECS",
                reason: format!("must be at most {}", MAX_SESSION_TTL.as_secs()),
            });
        }

        let password_policy = match var("PASSWORD_POLICY") {
            Some(raw) => raw
                .parse::<PasswordPolicy>()
                .map_err(|reason| ConfigError::Invalid {
                    name: "PASSWORD_POLICY",
                    reason,
                })?,
            None => PasswordPolicy::default(),
        };

        Ok(Self {
            database_url,
            database_max_connections,
            port,
            frontend_origins,
            session_sweep_period: Duration::from_secs(session_sweep_secs),
            auth: AuthConfig {
                session_secret,
                session_ttl: Duration::from_secs(session_ttl_secs),
                cookie_secure,
                password_policy,
                ..AuthConfig::default()
            },
        })
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
