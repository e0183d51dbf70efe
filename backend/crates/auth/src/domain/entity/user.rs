//! User Entity
//!
//! A registered user. Created once at sign-up and never modified by this
//! crate.

use platform::password::HashedPassword;

use crate::domain::value_object::{UserId, email::Email, user_name::UserName};

/// Stored user as seen after a successful credential lookup
///
/// The password hash stays in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: Email,
}

/// User to be inserted at sign-up
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub password_hash: HashedPassword,
}
