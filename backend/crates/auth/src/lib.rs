//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, store traits
//! - `application/` - Use cases, token codec, the `AuthService` facade
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router, bearer middleware
//!
//! ## Features
//! - Sign-up with name, email and password
//! - Sign-in by email and password, answered with a token pair
//! - Stateless HS256 access tokens (24 h)
//! - Opaque single-use refresh tokens (12 h), rotated on every refresh
//!
//! ## Security Model
//! - At most one live refresh session per user; a new one replaces the old
//! - Consuming a refresh token deletes its session in the same statement
//! - Passwords hashed with HMAC-SHA256 under an application-wide salt. The
//!   hash is also the lookup key, so it cannot be per-user salted.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{AccessTokenCodec, AuthConfig, AuthService, TokenPair};
pub use error::{AuthError, AuthResult};
pub use infra::{MemoryAuthRepository, PgAuthRepository};
pub use presentation::router::{auth_router_generic, auth_router_with_service};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::domain::repository::{CredentialStore, SessionStore};
    pub use crate::infra::memory::MemoryAuthRepository as MemoryStore;
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
