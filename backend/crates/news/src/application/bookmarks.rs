//! Bookmark Service
//!
//! Bookmarks always belong to the authenticated caller.

use std::sync::Arc;

use kernel::id::{ArticleId, UserId};

use crate::domain::entities::ArticleView;
use crate::domain::repository::BookmarkRepository;
use crate::error::NewsResult;

pub struct BookmarkService<R>
where
    R: BookmarkRepository,
{
    repo: Arc<R>,
}

impl<R> BookmarkService<R>
where
    R: BookmarkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn add(&self, user_id: UserId, article_id: ArticleId) -> NewsResult<()> {
        self.repo.add(user_id, article_id).await?;
        tracing::debug!(user_id = %user_id, article_id = %article_id, "Article bookmarked");
        Ok(())
    }

    pub async fn list(&self, user_id: UserId) -> NewsResult<Vec<ArticleView>> {
        self.repo.list(user_id).await
    }
}
