//! In-Memory Repository Implementations
//!
//! Process-local stores with the same observable behavior as the Postgres
//! ones, including unique-email rejection and atomic consume. Used by tests
//! and for running without a database.

use std::borrow::Cow;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use sqlx::error::{DatabaseError, ErrorKind as DbErrorKind};

use platform::password::HashedPassword;

use crate::domain::entity::{
    refresh_session::{NewRefreshSession, RefreshSession},
    user::{NewUser, User},
};
use crate::domain::repository::{CredentialStore, SessionStore};
use crate::domain::value_object::{UserId, email::Email, refresh_token::RefreshToken};
use crate::error::{AuthError, AuthResult};
use kernel::id::RefreshSessionId;

#[derive(Default)]
struct MemoryState {
    users: Vec<(User, HashedPassword)>,
    /// one session per user
    sessions: HashMap<UserId, RefreshSession>,
    last_user_id: i64,
    last_session_id: i64,
}

/// In-memory auth repository; clones share state
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AuthResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| AuthError::Internal("memory store lock poisoned".to_string()))
    }

    /// Number of live (stored) sessions
    pub fn session_count(&self) -> usize {
        self.state.lock().map(|s| s.sessions.len()).unwrap_or(0)
    }

    /// Move every stored session's expiry back by `by`
    #[cfg(test)]
    pub(crate) fn backdate_sessions(&self, by: chrono::Duration) {
        if let Ok(mut state) = self.state.lock() {
            for session in state.sessions.values_mut() {
                session.expires_at -= by;
            }
        }
    }
}

impl CredentialStore for MemoryAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut state = self.lock()?;

        if state.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(AuthError::StoreUnavailable(sqlx::Error::Database(Box::new(
                UniqueViolation {
                    constraint: "users_email_key",
                },
            ))));
        }

        state.last_user_id += 1;
        let created = User {
            id: UserId::from_i64(state.last_user_id),
            name: user.name.clone(),
            email: user.email.clone(),
        };
        state
            .users
            .push((created.clone(), user.password_hash.clone()));

        Ok(created)
    }

    async fn find_by_credentials(
        &self,
        email: &Email,
        password_hash: &HashedPassword,
    ) -> AuthResult<Option<User>> {
        let state = self.lock()?;
        Ok(state
            .users
            .iter()
            .find(|(u, hash)| &u.email == email && hash == password_hash)
            .map(|(u, _)| u.clone()))
    }
}

impl SessionStore for MemoryAuthRepository {
    async fn create(&self, session: &NewRefreshSession) -> AuthResult<RefreshSession> {
        let mut state = self.lock()?;

        let id = match state.sessions.get(&session.user_id) {
            Some(existing) => existing.id,
            None => {
                state.last_session_id += 1;
                RefreshSessionId::from_i64(state.last_session_id)
            }
        };

        let stored = RefreshSession {
            id,
            user_id: session.user_id,
            token: session.token.clone(),
            expires_at: session.expires_at,
        };
        state.sessions.insert(session.user_id, stored.clone());

        Ok(stored)
    }

    async fn consume_by_token(&self, token: &RefreshToken) -> AuthResult<Option<RefreshSession>> {
        let mut state = self.lock()?;

        let user_id = state
            .sessions
            .values()
            .find(|s| &s.token == token)
            .map(|s| s.user_id);

        Ok(user_id.and_then(|id| state.sessions.remove(&id)))
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut state = self.lock()?;

        let before = state.sessions.len();
        state.sessions.retain(|_, s| !s.is_expired_at(now));

        Ok((before - state.sessions.len()) as u64)
    }
}

// ============================================================================
// Unique violation reported the way Postgres does (SQLSTATE 23505)
// ============================================================================

#[derive(Debug)]
struct UniqueViolation {
    constraint: &'static str,
}

impl fmt::Display for UniqueViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "duplicate key value violates unique constraint \"{}\"",
            self.constraint
        )
    }
}

impl StdError for UniqueViolation {}

impl DatabaseError for UniqueViolation {
    fn message(&self) -> &str {
        "duplicate key value violates unique constraint"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("23505"))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        Some(self.constraint)
    }

    fn kind(&self) -> DbErrorKind {
        DbErrorKind::UniqueViolation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_name::UserName;
    use chrono::Duration;
    use kernel::error::kind::ErrorKind;

    fn hash(byte: char) -> HashedPassword {
        HashedPassword::from_db(byte.to_string().repeat(64)).unwrap()
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: UserName::new("Ada").unwrap(),
            email: Email::new(email).unwrap(),
            password_hash: hash('a'),
        }
    }

    fn new_session(user_id: i64) -> NewRefreshSession {
        NewRefreshSession::issue(UserId::from_i64(user_id), Duration::hours(12), Utc::now())
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let repo = MemoryAuthRepository::new();
        CredentialStore::create(&repo, &new_user("ada@example.com"))
            .await
            .unwrap();

        let err = CredentialStore::create(&repo, &new_user("ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_find_by_credentials_requires_both() {
        let repo = MemoryAuthRepository::new();
        let user = CredentialStore::create(&repo, &new_user("ada@example.com"))
            .await
            .unwrap();
        let email = Email::new("ada@example.com").unwrap();
        let other = Email::new("bob@example.com").unwrap();

        let found = repo.find_by_credentials(&email, &hash('a')).await.unwrap();
        assert_eq!(found, Some(user));
        assert!(repo.find_by_credentials(&email, &hash('b')).await.unwrap().is_none());
        assert!(repo.find_by_credentials(&other, &hash('a')).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_new_session_replaces_previous() {
        let repo = MemoryAuthRepository::new();
        let first = SessionStore::create(&repo, &new_session(1)).await.unwrap();
        let second = SessionStore::create(&repo, &new_session(1)).await.unwrap();

        assert_eq!(repo.session_count(), 1);
        assert!(repo.consume_by_token(&first.token).await.unwrap().is_none());
        assert!(repo.consume_by_token(&second.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_consume_is_single_use() {
        let repo = MemoryAuthRepository::new();
        let session = SessionStore::create(&repo, &new_session(1)).await.unwrap();

        let consumed = repo.consume_by_token(&session.token).await.unwrap();
        assert_eq!(consumed, Some(session.clone()));
        assert!(repo.consume_by_token(&session.token).await.unwrap().is_none());
        assert_eq!(repo.session_count(), 0);
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let repo = MemoryAuthRepository::new();
        SessionStore::create(&repo, &new_session(1)).await.unwrap();
        SessionStore::create(&repo, &new_session(2)).await.unwrap();
        repo.backdate_sessions(Duration::hours(13));
        SessionStore::create(&repo, &new_session(3)).await.unwrap();

        assert_eq!(repo.cleanup_expired().await.unwrap(), 2);
        assert_eq!(repo.session_count(), 1);
    }
}
