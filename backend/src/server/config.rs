//! Environment-driven application configuration.
//!
//! All settings come from the environment so the same binary serves dev,
//! CI, and production. The JWT signing secret is read from a file path
//! (mounted secret); outside release builds a missing secret degrades to
//! an ephemeral one so local runs need no setup.

use std::env;
use std::net::SocketAddr;

use rand::RngCore;
use tracing::warn;

/// Default path for the mounted JWT signing secret.
const DEFAULT_JWT_SECRET_FILE: &str = "/var/run/secrets/jwt_secret";

/// Default bearer-token lifetime: eight hours, one shift.
const DEFAULT_TOKEN_TTL_SECS: u64 = 8 * 60 * 60;

/// Token issuer claim.
const TOKEN_ISSUER: &str = "hotel-backend";

/// Configuration failures that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable {name}")]
    MissingVar {
        /// Variable name.
        name: &'static str,
    },

    /// An environment variable holds an unparseable value.
    #[error("invalid value for {name}: {message}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// What was wrong.
        message: String,
    },

    /// The JWT secret file could not be read and no fallback applies.
    #[error("failed to read JWT secret at {path}: {message}")]
    SecretUnavailable {
        /// Path that was tried.
        path: String,
        /// Underlying I/O failure.
        message: String,
    },
}

/// Resolved application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// JWT signing secret.
    pub jwt_secret: Vec<u8>,
    /// Bearer-token lifetime in seconds.
    pub token_ttl_secs: u64,
    /// Issuer claim stamped into every token.
    pub issuer: String,
    /// Shared secret for the scheduled checkout endpoint.
    pub cron_token: String,
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar { name })
}

fn ephemeral_allowed() -> bool {
    cfg!(debug_assertions) || env::var("AUTH_ALLOW_EPHEMERAL").ok().as_deref() == Some("1")
}

fn ephemeral_secret() -> Vec<u8> {
    let mut secret = vec![0u8; 32];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

fn load_jwt_secret() -> Result<Vec<u8>, ConfigError> {
    let path =
        env::var("JWT_SECRET_FILE").unwrap_or_else(|_| DEFAULT_JWT_SECRET_FILE.to_owned());
    match std::fs::read(&path) {
        Ok(bytes) if !bytes.is_empty() => Ok(bytes),
        Ok(_) => Err(ConfigError::SecretUnavailable {
            path,
            message: "secret file is empty".to_owned(),
        }),
        Err(err) if ephemeral_allowed() => {
            warn!(path = %path, error = %err, "using ephemeral JWT secret (dev only)");
            Ok(ephemeral_secret())
        }
        Err(err) => Err(ConfigError::SecretUnavailable {
            path,
            message: err.to_string(),
        }),
    }
}

fn load_cron_token() -> Result<String, ConfigError> {
    match env::var("CRON_TOKEN") {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ if ephemeral_allowed() => {
            let token = uuid::Uuid::new_v4().to_string();
            warn!("CRON_TOKEN not set; generated an ephemeral scheduler token (dev only)");
            Ok(token)
        }
        _ => Err(ConfigError::MissingVar { name: "CRON_TOKEN" }),
    }
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `DATABASE_URL` is missing, `BIND_ADDR`
    /// or `AUTH_TOKEN_TTL_SECS` cannot be parsed, or no usable JWT secret or
    /// scheduler token is available.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require_var("DATABASE_URL")?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_owned())
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidVar {
                name: "BIND_ADDR",
                message: err.to_string(),
            })?;

        let token_ttl_secs = match env::var("AUTH_TOKEN_TTL_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|err| ConfigError::InvalidVar {
                name: "AUTH_TOKEN_TTL_SECS",
                message: err.to_string(),
            })?,
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        Ok(Self {
            database_url,
            bind_addr,
            jwt_secret: load_jwt_secret()?,
            token_ttl_secs,
            issuer: TOKEN_ISSUER.to_owned(),
            cron_token: load_cron_token()?,
        })
    }
}
