//! Sign In Use Case
//!
//! Resolves credentials to a user and issues a token pair.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordHasher};

use crate::application::issue_tokens::{TokenIssuer, TokenPair};
use crate::domain::repository::{CredentialStore, SessionStore};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<C, S>
where
    C: CredentialStore,
    S: SessionStore,
{
    credential_repo: Arc<C>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: TokenIssuer<S>,
}

impl<C, S> SignInUseCase<C, S>
where
    C: CredentialStore,
    S: SessionStore,
{
    pub fn new(credential_repo: Arc<C>, hasher: Arc<dyn PasswordHasher>, issuer: TokenIssuer<S>) -> Self {
        Self {
            credential_repo,
            hasher,
            issuer,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<TokenPair> {
        let email = Email::new(input.email)?;
        let password = ClearTextPassword::for_lookup(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let password_hash = self.hasher.hash(&password)?;

        // wrong email and wrong password look the same from here on
        let user = self
            .credential_repo
            .find_by_credentials(&email, &password_hash)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let pair = self.issuer.issue(user.id).await?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(pair)
    }
}
