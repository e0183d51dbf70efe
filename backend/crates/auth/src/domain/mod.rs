//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    refresh_session::{NewRefreshSession, RefreshSession},
    user::{NewUser, User},
};
pub use repository::{CredentialStore, SessionStore};
