//! Token Issuance
//!
//! Shared by sign-in and refresh: sign an access token, store a new refresh
//! session, hand both back together.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::access_token::AccessTokenCodec;
use crate::application::config::AuthConfig;
use crate::domain::entity::refresh_session::NewRefreshSession;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::{UserId, refresh_token::RefreshToken};
use crate::error::{AuthError, AuthResult};

/// Access token plus the refresh token that can replace it
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: RefreshToken,
    pub refresh_expires_at: DateTime<Utc>,
}

pub struct TokenIssuer<S>
where
    S: SessionStore,
{
    session_repo: Arc<S>,
    codec: Arc<AccessTokenCodec>,
    config: Arc<AuthConfig>,
}

impl<S> TokenIssuer<S>
where
    S: SessionStore,
{
    pub fn new(session_repo: Arc<S>, codec: Arc<AccessTokenCodec>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            codec,
            config,
        }
    }

    /// Issue a fresh pair for `user_id`
    ///
    /// The access token is signed before anything is stored, so a signing
    /// failure leaves the user's current session untouched.
    pub async fn issue(&self, user_id: UserId) -> AuthResult<TokenPair> {
        let now = Utc::now();
        let access_token = self.codec.issue(user_id, now)?;

        let ttl = chrono::Duration::from_std(self.config.refresh_token_ttl)
            .map_err(|e| AuthError::Internal(format!("refresh token ttl: {e}")))?;
        let session = self
            .session_repo
            .create(&NewRefreshSession::issue(user_id, ttl, now))
            .await?;

        tracing::debug!(
            user_id = %user_id,
            session_id = %session.id,
            expires_at = %session.expires_at,
            "Token pair issued"
        );

        Ok(TokenPair {
            access_token,
            refresh_token: session.token,
            refresh_expires_at: session.expires_at,
        })
    }
}
