//! In-Memory Repository Implementation
//!
//! Mirrors the Postgres schema's behavior: deleting an author drops their
//! articles, deleting an article drops its bookmarks, and references to
//! missing rows are rejected.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use kernel::id::{ArticleId, AuthorId, UserId};

use crate::domain::entities::{
    Article, ArticleChanges, ArticleView, Author, AuthorChanges, NewArticle, NewAuthor,
};
use crate::domain::repository::{ArticleRepository, AuthorRepository, BookmarkRepository};
use crate::error::{NewsError, NewsResult};

#[derive(Default)]
struct MemoryState {
    authors: BTreeMap<i64, Author>,
    articles: BTreeMap<i64, Article>,
    /// (user, article) in insertion order
    bookmarks: Vec<(UserId, ArticleId)>,
    last_author_id: i64,
    last_article_id: i64,
}

impl MemoryState {
    fn view(&self, article: &Article) -> NewsResult<ArticleView> {
        let author = self
            .authors
            .get(&article.author_id.as_i64())
            .ok_or_else(|| NewsError::Internal(format!("article {} has no author", article.id)))?;
        Ok(ArticleView::new(article, author))
    }

    fn views<'a>(&self, articles: impl Iterator<Item = &'a Article>) -> NewsResult<Vec<ArticleView>> {
        let mut views = articles
            .map(|a| self.view(a))
            .collect::<NewsResult<Vec<_>>>()?;
        views.sort_by_key(|v| (v.created_at, v.id.as_i64()));
        Ok(views)
    }
}

/// In-memory news repository; clones share state
#[derive(Clone, Default)]
pub struct MemoryNewsRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryNewsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> NewsResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| NewsError::Internal("memory store lock poisoned".to_string()))
    }
}

impl AuthorRepository for MemoryNewsRepository {
    async fn create(&self, author: &NewAuthor) -> NewsResult<Author> {
        let mut state = self.lock()?;

        state.last_author_id += 1;
        let created = Author {
            id: AuthorId::from_i64(state.last_author_id),
            name: author.name.clone(),
            surname: author.surname.clone(),
        };
        state.authors.insert(created.id.as_i64(), created.clone());

        Ok(created)
    }

    async fn list(&self) -> NewsResult<Vec<Author>> {
        Ok(self.lock()?.authors.values().cloned().collect())
    }

    async fn find_by_id(&self, id: AuthorId) -> NewsResult<Option<Author>> {
        Ok(self.lock()?.authors.get(&id.as_i64()).cloned())
    }

    async fn update(&self, id: AuthorId, changes: &AuthorChanges) -> NewsResult<Option<Author>> {
        let mut state = self.lock()?;

        let Some(author) = state.authors.get_mut(&id.as_i64()) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            author.name = name.clone();
        }
        if let Some(surname) = &changes.surname {
            author.surname = surname.clone();
        }

        Ok(Some(author.clone()))
    }

    async fn delete(&self, id: AuthorId) -> NewsResult<bool> {
        let mut state = self.lock()?;

        if state.authors.remove(&id.as_i64()).is_none() {
            return Ok(false);
        }

        let state = &mut *state;
        state.articles.retain(|_, a| a.author_id != id);
        let articles = &state.articles;
        state
            .bookmarks
            .retain(|(_, article_id)| articles.contains_key(&article_id.as_i64()));

        Ok(true)
    }

    async fn list_articles(&self, id: AuthorId) -> NewsResult<Vec<ArticleView>> {
        let state = self.lock()?;
        state.views(state.articles.values().filter(|a| a.author_id == id))
    }
}

impl ArticleRepository for MemoryNewsRepository {
    async fn create(&self, article: &NewArticle) -> NewsResult<Article> {
        let mut state = self.lock()?;

        if !state.authors.contains_key(&article.author_id.as_i64()) {
            return Err(NewsError::AuthorNotFound);
        }

        state.last_article_id += 1;
        let created = Article {
            id: ArticleId::from_i64(state.last_article_id),
            author_id: article.author_id,
            title: article.title.clone(),
            content: article.content.clone(),
            created_at: article.created_at,
        };
        state.articles.insert(created.id.as_i64(), created.clone());

        Ok(created)
    }

    async fn list(&self) -> NewsResult<Vec<ArticleView>> {
        let state = self.lock()?;
        state.views(state.articles.values())
    }

    async fn find_by_id(&self, id: ArticleId) -> NewsResult<Option<ArticleView>> {
        let state = self.lock()?;
        state
            .articles
            .get(&id.as_i64())
            .map(|a| state.view(a))
            .transpose()
    }

    async fn update(&self, id: ArticleId, changes: &ArticleChanges) -> NewsResult<bool> {
        let mut state = self.lock()?;

        let Some(article) = state.articles.get_mut(&id.as_i64()) else {
            return Ok(false);
        };
        if let Some(title) = &changes.title {
            article.title = title.clone();
        }
        if let Some(content) = &changes.content {
            article.content = content.clone();
        }

        Ok(true)
    }

    async fn delete(&self, id: ArticleId) -> NewsResult<bool> {
        let mut state = self.lock()?;

        if state.articles.remove(&id.as_i64()).is_none() {
            return Ok(false);
        }
        state.bookmarks.retain(|(_, article_id)| *article_id != id);

        Ok(true)
    }
}

impl BookmarkRepository for MemoryNewsRepository {
    async fn add(&self, user_id: UserId, article_id: ArticleId) -> NewsResult<()> {
        let mut state = self.lock()?;

        if !state.articles.contains_key(&article_id.as_i64()) {
            return Err(NewsError::ArticleNotFound);
        }
        if !state.bookmarks.contains(&(user_id, article_id)) {
            state.bookmarks.push((user_id, article_id));
        }

        Ok(())
    }

    async fn list(&self, user_id: UserId) -> NewsResult<Vec<ArticleView>> {
        let state = self.lock()?;
        state
            .bookmarks
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .filter_map(|(_, article_id)| state.articles.get(&article_id.as_i64()))
            .map(|a| state.view(a))
            .collect()
    }
}
