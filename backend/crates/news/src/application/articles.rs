//! Article Service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, AuthorId};

use crate::domain::entities::{ArticleChanges, ArticleView, NewArticle};
use crate::domain::repository::ArticleRepository;
use crate::domain::value_objects::{ArticleContent, ArticleTitle};
use crate::error::{NewsError, NewsResult};

pub struct CreateArticleInput {
    pub author_id: AuthorId,
    pub title: String,
    pub content: String,
    /// Publication time; now if absent
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields left `None` are kept
#[derive(Default)]
pub struct UpdateArticleInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

pub struct ArticleService<R>
where
    R: ArticleRepository,
{
    repo: Arc<R>,
}

impl<R> ArticleService<R>
where
    R: ArticleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CreateArticleInput) -> NewsResult<ArticleId> {
        let article = NewArticle {
            author_id: input.author_id,
            title: ArticleTitle::new(&input.title)?,
            content: ArticleContent::new(&input.content)?,
            created_at: input.created_at.unwrap_or_else(Utc::now),
        };

        let created = self.repo.create(&article).await?;
        tracing::info!(
            article_id = %created.id,
            author_id = %created.author_id,
            "Article created"
        );

        Ok(created.id)
    }

    pub async fn list(&self) -> NewsResult<Vec<ArticleView>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: ArticleId) -> NewsResult<ArticleView> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(NewsError::ArticleNotFound)
    }

    pub async fn update(&self, id: ArticleId, input: UpdateArticleInput) -> NewsResult<()> {
        let changes = ArticleChanges {
            title: input.title.map(ArticleTitle::new).transpose()?,
            content: input.content.map(ArticleContent::new).transpose()?,
        };
        if changes.is_empty() {
            return Err(NewsError::EmptyUpdate);
        }

        if !self.repo.update(id, &changes).await? {
            return Err(NewsError::ArticleNotFound);
        }
        tracing::info!(article_id = %id, "Article updated");

        Ok(())
    }

    pub async fn delete(&self, id: ArticleId) -> NewsResult<()> {
        if !self.repo.delete(id).await? {
            return Err(NewsError::ArticleNotFound);
        }
        tracing::info!(article_id = %id, "Article deleted");
        Ok(())
    }
}
