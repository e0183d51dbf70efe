//! Sign Up Use Case
//!
//! Creates a new user account. No tokens are issued here.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordHasher};

use crate::domain::entity::user::NewUser;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{UserId, email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub user_id: UserId,
}

/// Sign up use case
pub struct SignUpUseCase<C>
where
    C: CredentialStore,
{
    credential_repo: Arc<C>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<C> SignUpUseCase<C>
where
    C: CredentialStore,
{
    pub fn new(credential_repo: Arc<C>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            credential_repo,
            hasher,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let name = UserName::new(&input.name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(input.email)?;
        let password =
            ClearTextPassword::new(input.password).map_err(|e| AuthError::Validation(e.to_string()))?;

        let password_hash = self.hasher.hash(&password)?;

        let user = self
            .credential_repo
            .create(&NewUser {
                name,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User signed up");

        Ok(SignUpOutput { user_id: user.id })
    }
}
