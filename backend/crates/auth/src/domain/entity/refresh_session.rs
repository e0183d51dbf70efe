//! Refresh Session Entity
//!
//! Server-side record behind a refresh token. A session is read exactly once
//! (the read deletes it) or is left to expire; it is never extended.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{UserId, refresh_token::RefreshToken};
use kernel::id::RefreshSessionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSession {
    pub id: RefreshSessionId,
    pub user_id: UserId,
    pub token: RefreshToken,
    pub expires_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Expired from `expires_at` onwards
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Session to be stored for a user, replacing any session the user had
#[derive(Debug, Clone)]
pub struct NewRefreshSession {
    pub user_id: UserId,
    pub token: RefreshToken,
    pub expires_at: DateTime<Utc>,
}

impl NewRefreshSession {
    /// New session with a freshly generated token
    pub fn issue(user_id: UserId, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            token: RefreshToken::generate(),
            expires_at: now + ttl,
        }
    }
}
