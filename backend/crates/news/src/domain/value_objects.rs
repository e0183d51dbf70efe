//! Domain Value Objects
//!
//! Validated text fields for authors and articles. Lengths are counted in
//! characters after trimming surrounding whitespace.

use derive_more::Display;

use crate::error::{NewsError, NewsResult};

pub const PERSON_NAME_MAX_LENGTH: usize = 100;
pub const TITLE_MIN_LENGTH: usize = 10;
pub const TITLE_MAX_LENGTH: usize = 255;
pub const CONTENT_MIN_LENGTH: usize = 20;

/// Author first name or surname
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(field: &str, raw: impl AsRef<str>) -> NewsResult<Self> {
        bounded(field, raw.as_ref(), 1, Some(PERSON_NAME_MAX_LENGTH)).map(Self)
    }

    /// Restore from a database value without re-validating
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    pub fn new(raw: impl AsRef<str>) -> NewsResult<Self> {
        bounded("title", raw.as_ref(), TITLE_MIN_LENGTH, Some(TITLE_MAX_LENGTH)).map(Self)
    }

    /// Restore from a database value without re-validating
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct ArticleContent(String);

impl ArticleContent {
    pub fn new(raw: impl AsRef<str>) -> NewsResult<Self> {
        bounded("content", raw.as_ref(), CONTENT_MIN_LENGTH, None).map(Self)
    }

    /// Restore from a database value without re-validating
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn bounded(field: &str, raw: &str, min: usize, max: Option<usize>) -> NewsResult<String> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();

    if length < min {
        return Err(NewsError::Validation(if min == 1 {
            format!("{field} cannot be empty")
        } else {
            format!("{field} must be at least {min} characters (got {length})")
        }));
    }

    if let Some(max) = max
        && length > max
    {
        return Err(NewsError::Validation(format!(
            "{field} must be at most {max} characters (got {length})"
        )));
    }

    if trimmed.chars().any(|c| c.is_control() && c != '\n' && c != '\t' && c != '\r') {
        return Err(NewsError::Validation(format!(
            "{field} contains control characters"
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name() {
        assert_eq!(PersonName::new("name", "  Ada ").unwrap().as_str(), "Ada");
        assert!(PersonName::new("name", "   ").is_err());
        assert!(PersonName::new("surname", "x".repeat(101)).is_err());
    }

    #[test]
    fn test_title_length_bounds() {
        assert!(ArticleTitle::new("123456789").is_err());
        assert!(ArticleTitle::new("1234567890").is_ok());
        // trimmed before counting
        assert!(ArticleTitle::new("  123456789  ").is_err());
        assert!(ArticleTitle::new("t".repeat(TITLE_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        // 10 characters, 30 bytes
        assert!(ArticleTitle::new("ニュースのタイトルだ").is_ok());
        assert!(ArticleTitle::new("ニュースのタイトル").is_err());
    }

    #[test]
    fn test_content_allows_newlines() {
        assert!(ArticleContent::new("first paragraph\n\nsecond one").is_ok());
        assert!(ArticleContent::new("short").is_err());
        assert!(ArticleContent::new("twenty chars or more\u{0}").is_err());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = ArticleTitle::new("short").unwrap_err();
        assert!(err.to_string().contains("title"));
    }
}
