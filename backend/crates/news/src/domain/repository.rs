//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer.

use kernel::id::{ArticleId, AuthorId, UserId};

use crate::domain::entities::{
    Article, ArticleChanges, ArticleView, Author, AuthorChanges, NewArticle, NewAuthor,
};
use crate::error::NewsResult;

#[trait_variant::make(AuthorRepository: Send)]
pub trait LocalAuthorRepository {
    async fn create(&self, author: &NewAuthor) -> NewsResult<Author>;

    async fn list(&self) -> NewsResult<Vec<Author>>;

    async fn find_by_id(&self, id: AuthorId) -> NewsResult<Option<Author>>;

    /// Apply `changes`, returning the updated author or `None` if absent
    async fn update(&self, id: AuthorId, changes: &AuthorChanges) -> NewsResult<Option<Author>>;

    /// Delete an author together with their articles. `false` if absent.
    async fn delete(&self, id: AuthorId) -> NewsResult<bool>;

    /// Articles written by `id`, oldest first
    async fn list_articles(&self, id: AuthorId) -> NewsResult<Vec<ArticleView>>;
}

#[trait_variant::make(ArticleRepository: Send)]
pub trait LocalArticleRepository {
    /// Insert an article. An unknown author yields `NewsError::AuthorNotFound`.
    async fn create(&self, article: &NewArticle) -> NewsResult<Article>;

    async fn list(&self) -> NewsResult<Vec<ArticleView>>;

    async fn find_by_id(&self, id: ArticleId) -> NewsResult<Option<ArticleView>>;

    /// Apply `changes`; `false` if the article is absent
    async fn update(&self, id: ArticleId, changes: &ArticleChanges) -> NewsResult<bool>;

    async fn delete(&self, id: ArticleId) -> NewsResult<bool>;
}

/// Everything the news router needs from one store
pub trait NewsRepository:
    AuthorRepository + ArticleRepository + BookmarkRepository + Send + Sync + 'static
{
}

impl<T> NewsRepository for T where
    T: AuthorRepository + ArticleRepository + BookmarkRepository + Send + Sync + 'static
{
}

/// Per-user saved articles
#[trait_variant::make(BookmarkRepository: Send)]
pub trait LocalBookmarkRepository {
    /// Bookmark an article. Idempotent; an unknown article yields
    /// `NewsError::ArticleNotFound`.
    async fn add(&self, user_id: UserId, article_id: ArticleId) -> NewsResult<()>;

    async fn list(&self, user_id: UserId) -> NewsResult<Vec<ArticleView>>;
}
