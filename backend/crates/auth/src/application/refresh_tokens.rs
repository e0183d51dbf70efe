//! Refresh Tokens Use Case
//!
//! Exchanges a refresh token for a new pair. The presented session is
//! consumed whether or not the exchange succeeds.

use std::sync::Arc;

use chrono::Utc;

use crate::application::issue_tokens::{TokenIssuer, TokenPair};
use crate::domain::repository::SessionStore;
use crate::domain::value_object::refresh_token::RefreshToken;
use crate::error::{AuthError, AuthResult};

pub struct RefreshTokensUseCase<S>
where
    S: SessionStore,
{
    session_repo: Arc<S>,
    issuer: TokenIssuer<S>,
}

impl<S> RefreshTokensUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_repo: Arc<S>, issuer: TokenIssuer<S>) -> Self {
        Self {
            session_repo,
            issuer,
        }
    }

    pub async fn execute(&self, token: &RefreshToken) -> AuthResult<TokenPair> {
        let session = self
            .session_repo
            .consume_by_token(token)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired_at(Utc::now()) {
            tracing::info!(
                user_id = %session.user_id,
                expired_at = %session.expires_at,
                "Refresh session expired"
            );
            return Err(AuthError::SessionExpired);
        }

        let pair = self.issuer.issue(session.user_id).await?;

        tracing::info!(user_id = %session.user_id, "Tokens refreshed");

        Ok(pair)
    }
}
