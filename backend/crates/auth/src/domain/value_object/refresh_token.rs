//! Refresh Token Value Object
//!
//! Opaque bearer secret for one refresh session: 32 bytes from the OS CSPRNG,
//! hex encoded.

use std::fmt;

use thiserror::Error;

/// Random bytes behind each token
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Length of the encoded token
pub const REFRESH_TOKEN_LEN: usize = REFRESH_TOKEN_BYTES * 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Refresh token must be {REFRESH_TOKEN_LEN} hex characters")]
pub struct MalformedRefreshToken;

/// Refresh token (64 lowercase hex characters)
///
/// `Debug` shows only a short prefix, enough to correlate log lines.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Draw a fresh token
    pub fn generate() -> Self {
        Self(platform::crypto::random_hex(REFRESH_TOKEN_BYTES))
    }

    /// Parse a presented token (cookie or database)
    pub fn parse(raw: &str) -> Result<Self, MalformedRefreshToken> {
        if raw.len() != REFRESH_TOKEN_LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MalformedRefreshToken);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefreshToken({}…)", &self.0[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let token = RefreshToken::generate();
        assert_eq!(token.as_str().len(), REFRESH_TOKEN_LEN);
        assert!(hex::decode(token.as_str()).is_ok());
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(RefreshToken::generate(), RefreshToken::generate());
    }

    #[test]
    fn test_parse_roundtrip() {
        let token = RefreshToken::generate();
        assert_eq!(RefreshToken::parse(token.as_str()).unwrap(), token);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(RefreshToken::parse("").is_err());
        assert!(RefreshToken::parse("abc").is_err());
        assert!(RefreshToken::parse(&"g".repeat(REFRESH_TOKEN_LEN)).is_err());
        assert!(RefreshToken::parse(&"a".repeat(REFRESH_TOKEN_LEN + 1)).is_err());
    }

    #[test]
    fn test_debug_is_truncated() {
        let token = RefreshToken::generate();
        let debug = format!("{:?}", token);
        assert!(!debug.contains(token.as_str()));
        assert!(debug.contains(&token.as_str()[..8]));
    }
}
