//! Password Policy and Hashing
//!
//! The stored password form doubles as a lookup key: users are resolved with
//! `WHERE email = $1 AND password_hash = $2`. The hash therefore has to be
//! deterministic, so it is an HMAC-SHA256 keyed with one application-wide
//! salt rather than a per-user salted KDF.
//!
//! ## Security Features
//! - Unicode NFKC normalization before hashing, so visually equal input hashes equally
//! - Zeroization of clear text and of the salt
//! - Redacted `Debug` output

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::hmac_sha256;

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length accepted at sign-up
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`; debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate a new password (sign-up)
    ///
    /// - NFKC normalized first
    /// - 8 to 128 code points
    /// - no control characters other than space, tab, newline
    /// - not a well-known weak password or pattern
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if is_common_pattern(&normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(Self(normalized))
    }

    /// Normalize a password presented at sign-in
    ///
    /// Only emptiness is rejected. A password that would fail today's policy
    /// simply hashes to something that matches no stored row.
    pub fn for_lookup(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();
        if normalized.is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }
        Ok(Self(normalized))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Stored password form: 64 lowercase hex characters
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Length of the hex-encoded digest
    pub const ENCODED_LEN: usize = 64;

    /// Restore from a database value
    pub fn from_db(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        if hash.len() != Self::ENCODED_LEN || !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PasswordHashError::InvalidHashFormat);
        }
        Ok(Self {
            hash: hash.to_ascii_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher capability
// ============================================================================

/// One-way, deterministic password transform
///
/// The same input must always produce the same output for a given
/// implementation instance; sign-in depends on it.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError>;
}

/// HMAC-SHA256 keyed with an application-wide salt
pub struct SaltedPasswordHasher {
    salt: Zeroizing<Vec<u8>>,
}

impl SaltedPasswordHasher {
    pub fn new(salt: impl Into<Vec<u8>>) -> Self {
        Self {
            salt: Zeroizing::new(salt.into()),
        }
    }
}

impl PasswordHasher for SaltedPasswordHasher {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let digest = hmac_sha256(&self.salt, password.as_bytes())
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
        Ok(HashedPassword {
            hash: hex::encode(digest),
        })
    }
}

impl fmt::Debug for SaltedPasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltedPasswordHasher")
            .field("salt", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    // "aaaaaaaa"
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    const KEYBOARD_PATTERNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx"];
    if KEYBOARD_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "abcdefgh",
        "letmein1",
        "welcome1",
        "admin123",
        "iloveyou",
        "sunshine",
        "princess",
        "football",
        "baseball",
        "trustno1",
    ];

    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// "12345678", "98765432" and wrap-arounds like "7890"
fn is_sequential_numbers(s: &str) -> bool {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 4 {
        return false;
    }

    let ascending = digits.windows(2).all(|w| w[1] == (w[0] + 1) % 10);
    let descending = digits.windows(2).all(|w| w[0] == (w[1] + 1) % 10);

    ascending || descending
}
