//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer.

use platform::password::HashedPassword;

use crate::domain::entity::{
    refresh_session::{NewRefreshSession, RefreshSession},
    user::{NewUser, User},
};
use crate::domain::value_object::{email::Email, refresh_token::RefreshToken};
use crate::error::AuthResult;

/// Users and their credentials
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Insert a user. A duplicate email is reported as the store's own error.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Resolve `(email, password hash)` to a user
    async fn find_by_credentials(
        &self,
        email: &Email,
        password_hash: &HashedPassword,
    ) -> AuthResult<Option<User>>;
}

/// Single-use refresh sessions, at most one per user
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Store a session, replacing the user's previous one if any
    async fn create(&self, session: &NewRefreshSession) -> AuthResult<RefreshSession>;

    /// Find the session holding `token` and delete it in the same atomic step
    ///
    /// Of two concurrent calls with the same token at most one gets `Some`.
    /// Expired sessions are returned too; the caller decides.
    async fn consume_by_token(&self, token: &RefreshToken) -> AuthResult<Option<RefreshSession>>;

    /// Delete sessions past their expiry, returning how many went
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
