//! Sign Out Use Case
//!
//! Drops the refresh session behind a presented token. Access tokens already
//! handed out stay valid until they expire.

use std::sync::Arc;

use crate::domain::repository::SessionStore;
use crate::domain::value_object::refresh_token::RefreshToken;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionStore,
{
    session_repo: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Returns whether a session was found
    pub async fn execute(&self, token: &RefreshToken) -> AuthResult<bool> {
        let consumed = self.session_repo.consume_by_token(token).await?;

        if let Some(session) = &consumed {
            tracing::info!(user_id = %session.user_id, "User signed out");
        }

        Ok(consumed.is_some())
    }
}
