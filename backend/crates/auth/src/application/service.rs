//! Auth Service
//!
//! Entry point the transport layer talks to. Holds the shared pieces and runs
//! one use case per call; no mutable state lives here.

use std::sync::Arc;

use platform::password::{PasswordHasher, SaltedPasswordHasher};

use crate::application::access_token::AccessTokenCodec;
use crate::application::config::AuthConfig;
use crate::application::issue_tokens::{TokenIssuer, TokenPair};
use crate::application::refresh_tokens::RefreshTokensUseCase;
use crate::application::sign_in::{SignInInput, SignInUseCase};
use crate::application::sign_out::SignOutUseCase;
use crate::application::sign_up::{SignUpInput, SignUpUseCase};
use crate::domain::repository::{CredentialStore, SessionStore};
use crate::domain::value_object::{UserId, refresh_token::RefreshToken};
use crate::error::{AuthError, AuthResult};

pub struct AuthService<R>
where
    R: CredentialStore + SessionStore,
{
    repo: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    codec: Arc<AccessTokenCodec>,
    config: Arc<AuthConfig>,
}

impl<R> Clone for AuthService<R>
where
    R: CredentialStore + SessionStore,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            hasher: self.hasher.clone(),
            codec: self.codec.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> AuthService<R>
where
    R: CredentialStore + SessionStore,
{
    /// Service with the salted HMAC password hasher from `config`
    pub fn new(repo: R, config: AuthConfig) -> AuthResult<Self> {
        if config.password_salt.is_empty() {
            return Err(AuthError::Internal("password salt must not be empty".into()));
        }
        let hasher = Arc::new(SaltedPasswordHasher::new(config.password_salt.clone()));
        Self::with_hasher(Arc::new(repo), hasher, Arc::new(config))
    }

    pub fn with_hasher(
        repo: Arc<R>,
        hasher: Arc<dyn PasswordHasher>,
        config: Arc<AuthConfig>,
    ) -> AuthResult<Self> {
        let codec = Arc::new(AccessTokenCodec::new(&config)?);
        Ok(Self {
            repo,
            hasher,
            codec,
            config,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Codec for verifying access tokens outside the service (middleware)
    pub fn codec(&self) -> Arc<AccessTokenCodec> {
        self.codec.clone()
    }

    fn issuer(&self) -> TokenIssuer<R> {
        TokenIssuer::new(self.repo.clone(), self.codec.clone(), self.config.clone())
    }

    pub async fn sign_up(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> AuthResult<UserId> {
        let use_case = SignUpUseCase::new(self.repo.clone(), self.hasher.clone());
        let output = use_case
            .execute(SignUpInput {
                name,
                email,
                password,
            })
            .await?;
        Ok(output.user_id)
    }

    pub async fn sign_in(&self, email: String, password: String) -> AuthResult<TokenPair> {
        let use_case = SignInUseCase::new(self.repo.clone(), self.hasher.clone(), self.issuer());
        use_case.execute(SignInInput { email, password }).await
    }

    /// A token that cannot even be parsed can have no session
    pub async fn refresh_tokens(&self, presented: &str) -> AuthResult<TokenPair> {
        let token = RefreshToken::parse(presented).map_err(|_| AuthError::SessionNotFound)?;
        let use_case = RefreshTokensUseCase::new(self.repo.clone(), self.issuer());
        use_case.execute(&token).await
    }

    pub fn parse_token(&self, access_token: &str) -> AuthResult<UserId> {
        self.codec.verify(access_token)
    }

    pub async fn sign_out(&self, presented: &str) -> AuthResult<bool> {
        let Ok(token) = RefreshToken::parse(presented) else {
            return Ok(false);
        };
        SignOutUseCase::new(self.repo.clone()).execute(&token).await
    }

    /// Housekeeping; run at startup
    pub async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
        let deleted = self.repo.cleanup_expired().await?;
        tracing::info!(sessions_deleted = deleted, "Cleaned up expired refresh sessions");
        Ok(deleted)
    }
}
