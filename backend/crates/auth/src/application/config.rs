//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;
/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing key for access tokens
    pub jwt_secret: Vec<u8>,
    /// Application-wide password salt
    pub password_salt: Vec<u8>,
    /// Access token lifetime (24 hours)
    pub access_token_ttl: Duration,
    /// Refresh session lifetime (12 hours)
    pub refresh_token_ttl: Duration,
    /// Refresh cookie name
    pub refresh_cookie_name: String,
    /// Path the refresh cookie is scoped to
    pub refresh_cookie_path: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            password_salt: Vec::new(),
            access_token_ttl: Duration::from_secs(24 * 3600),
            refresh_token_ttl: Duration::from_secs(12 * 3600),
            refresh_cookie_name: "refresh-token".to_string(),
            refresh_cookie_path: "/auth".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl AuthConfig {
    /// Production config with explicit secrets
    pub fn new(jwt_secret: Vec<u8>, password_salt: Vec<u8>) -> Self {
        Self {
            jwt_secret,
            password_salt,
            ..Default::default()
        }
    }

    /// Create config with a random signing secret and salt
    ///
    /// Tokens and password hashes do not survive a restart.
    pub fn with_random_secret() -> Self {
        Self::new(
            platform::crypto::random_bytes(32),
            platform::crypto::random_bytes(16),
        )
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Cookie attributes for the refresh token
    pub fn refresh_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.refresh_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: self.refresh_cookie_path.clone(),
            max_age_secs: Some(self.refresh_token_ttl.as_secs() as i64),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("password_salt", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("refresh_cookie_name", &self.refresh_cookie_name)
            .field("refresh_cookie_path", &self.refresh_cookie_path)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetimes() {
        let config = AuthConfig::default();
        assert_eq!(config.access_token_ttl.as_secs(), 86_400);
        assert_eq!(config.refresh_token_ttl.as_secs(), 43_200);
    }

    #[test]
    fn test_refresh_cookie_matches_session_lifetime() {
        let cookie = AuthConfig::development().refresh_cookie();
        assert_eq!(cookie.name, "refresh-token");
        assert_eq!(cookie.max_age_secs, Some(43_200));
        assert!(cookie.http_only);
        assert!(!cookie.secure);
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.jwt_secret.len(), 32);
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig::new(b"top-secret".to_vec(), b"pepper".to_vec());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("116")); // first byte of "top-secret"
        assert!(debug.contains("REDACTED"));
    }
}
