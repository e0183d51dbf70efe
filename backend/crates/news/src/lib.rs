//! News (Authors & Articles) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Author, article and bookmark services
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Every route expects the caller to be authenticated already; mount the
//! router behind `auth::middleware::require_access_token`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::{ArticleService, AuthorService, BookmarkService};
pub use error::{NewsError, NewsResult};
pub use infra::{MemoryNewsRepository, PgNewsRepository};
pub use presentation::router::news_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::domain::repository::{
        ArticleRepository, AuthorRepository, BookmarkRepository, NewsRepository,
    };
    pub use crate::infra::memory::MemoryNewsRepository as MemoryStore;
    pub use crate::infra::postgres::PgNewsRepository as NewsStore;
}
