//! User Name Value Object
//!
//! Display name given at sign-up. Not unique and not used for login.
//!
//! ## Invariants
//! - NFKC normalized, surrounding whitespace trimmed
//! - 1 to 100 characters
//! - no control characters

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for a user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 100;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name must be at most {max} characters (got {length})")]
    TooLong { length: usize, max: usize },

    #[error("Name contains control characters")]
    ControlCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(UserNameError::ControlCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Restore from a database value without re-validating
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(UserName::new("Ada").unwrap().as_str(), "Ada");
        assert_eq!(UserName::new("  Grace Hopper ").unwrap().as_str(), "Grace Hopper");
        assert!(UserName::new("山田 太郎").is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        assert_eq!(UserName::new(" \t "), Err(UserNameError::Empty));
    }

    #[test]
    fn test_too_long() {
        let name = "a".repeat(USER_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            UserName::new(name),
            Err(UserNameError::TooLong { length: 101, max: 100 })
        ));
    }

    #[test]
    fn test_control_characters_rejected() {
        assert_eq!(UserName::new("Ada\u{0}Lovelace"), Err(UserNameError::ControlCharacter));
    }

    #[test]
    fn test_nfkc_normalization() {
        // fullwidth "Ａｄａ"
        let name = UserName::new("\u{FF21}\u{FF44}\u{FF41}").unwrap();
        assert_eq!(name.to_string(), "Ada");
    }
}
