//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entities;
pub mod repository;
pub mod value_objects;

// Re-exports
pub use entities::{
    Article, ArticleChanges, ArticleView, Author, AuthorChanges, NewArticle, NewAuthor,
};
pub use repository::{ArticleRepository, AuthorRepository, BookmarkRepository, NewsRepository};
