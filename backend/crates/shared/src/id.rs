//! Common ID Types
//!
//! Typed wrappers over the `BIGSERIAL` primary keys used by every table, so a
//! user id can't be passed where an article id is expected.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
///
/// let id: UserId = "42".parse().unwrap();
/// assert_eq!(id.as_i64(), 42);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a database key
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn as_i64(&self) -> i64 {
        self.value
    }
}

// Manual impls: derives would require `T: Clone`, `T: PartialEq`, ...
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self::from_i64)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_i64)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    pub struct User;
    pub struct RefreshSession;
    pub struct Author;
    pub struct Article;
}

pub type UserId = Id<markers::User>;
pub type RefreshSessionId = Id<markers::RefreshSession>;
pub type AuthorId = Id<markers::Author>;
pub type ArticleId = Id<markers::Article>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: UserId = "17".parse().unwrap();
        assert_eq!(id.as_i64(), 17);
        assert_eq!(id.to_string(), "17");
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!("abc".parse::<ArticleId>().is_err());
        assert!("".parse::<ArticleId>().is_err());
    }

    #[test]
    fn test_serde_as_plain_integer() {
        let id = AuthorId::from_i64(5);
        assert_eq!(serde_json::to_string(&id).unwrap(), "5");
        let back: AuthorId = serde_json::from_str("5").unwrap();
        assert_eq!(back, id);
    }
}
