//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// `Debug` is not derived: the database URL may carry a password
#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub request_timeout: Duration,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build from any key lookup. `development` allows missing secrets,
    /// which are then generated per process.
    pub fn from_lookup<F>(lookup: F, development: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = parse_or(&lookup, "SERVER_PORT", DEFAULT_PORT)?;
        let database_max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let request_timeout = Duration::from_secs(parse_or(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        let mut auth = if development {
            AuthConfig::development()
        } else {
            AuthConfig::default()
        };

        match lookup("JWT_SECRET") {
            Some(secret_b64) => {
                let secret = general_purpose::STANDARD
                    .decode(secret_b64.trim())
                    .context("JWT_SECRET must be base64")?;
                if secret.len() < 32 {
                    bail!("JWT_SECRET must decode to at least 32 bytes");
                }
                auth.jwt_secret = secret;
            }
            None if development => {
                tracing::warn!("JWT_SECRET not set, using a per-process random secret");
            }
            None => bail!("JWT_SECRET must be set in production"),
        }

        match lookup("PASSWORD_SALT") {
            Some(salt) if !salt.is_empty() => auth.password_salt = salt.into_bytes(),
            _ if development => {
                tracing::warn!("PASSWORD_SALT not set, stored passwords won't verify after restart");
            }
            _ => bail!("PASSWORD_SALT must be set in production"),
        }

        if let Some(secure) = lookup("COOKIE_SECURE") {
            auth.cookie_secure = secure
                .parse()
                .context("COOKIE_SECURE must be true or false")?;
        }

        Ok(Self {
            database_url,
            database_max_connections,
            port,
            request_timeout,
            frontend_origins,
            auth,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} is not valid: {raw}")),
        None => Ok(default),
    }
}
