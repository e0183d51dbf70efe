//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use auth::middleware::AuthenticatedUser;
use kernel::id::{ArticleId, AuthorId, Id};

use crate::application::{ArticleService, AuthorService, BookmarkService};
use crate::domain::repository::NewsRepository;
use crate::error::{NewsError, NewsResult};
use crate::presentation::dto::{
    ArticleEnvelope, ArticleResponse, AuthorResponse, CreateArticleRequest, CreateAuthorRequest,
    CreatedResponse, DataResponse, StatusResponse, UpdateArticleRequest, UpdateAuthorRequest,
};

/// Shared state for news handlers
pub struct NewsAppState<R: NewsRepository> {
    pub repo: Arc<R>,
}

impl<R: NewsRepository> Clone for NewsAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: NewsRepository> NewsAppState<R> {
    fn authors(&self) -> AuthorService<R> {
        AuthorService::new(self.repo.clone())
    }

    fn articles(&self) -> ArticleService<R> {
        ArticleService::new(self.repo.clone())
    }

    fn bookmarks(&self) -> BookmarkService<R> {
        BookmarkService::new(self.repo.clone())
    }
}

type Created = (StatusCode, Json<CreatedResponse>);

// ============================================================================
// Authors
// ============================================================================

/// GET /authors
pub async fn list_authors<R: NewsRepository>(
    State(state): State<NewsAppState<R>>,
) -> NewsResult<Json<DataResponse<AuthorResponse>>> {
    let authors = state.authors().list().await?;

    Ok(Json(DataResponse {
        data: authors.into_iter().map(AuthorResponse::from).collect(),
    }))
}

/// POST /authors
pub async fn create_author<R: NewsRepository>(
    State(state): State<NewsAppState<R>>,
    Json(req): Json<CreateAuthorRequest>,
) -> NewsResult<Created> {
    let id = state.authors().create(req.into()).await?;
    Ok(created(id.as_i64()))
}

/// GET /authors/{id}
pub async fn get_author<R: NewsRepository>(
    State(state): State<NewsAppState<R>>,
    Path(id): Path<String>,
) -> NewsResult<Json<AuthorResponse>> {
    let author = state.authors().get(path_id(&id)?).await?;
    Ok(Json(author.into()))
}

/// PUT /authors/{id}
pub async fn update_author<R: NewsRepository>(
    State(state): State<NewsAppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAuthorRequest>,
) -> NewsResult<Json<AuthorResponse>> {
    let author = state.authors().update(path_id(&id)?, req.into()).await?;
    Ok(Json(author.into()))
}

/// DELETE /authors/{id}
pub async fn delete_author<R: NewsRepository>(
    State(state): State<NewsAppState<R>>,
    Path(id): Path<String>,
) -> NewsResult<Json<StatusResponse>> {
    let id: AuthorId = path_id(&id)?;
    state.authors().delete(id).await?;
    Ok(Json(StatusResponse::new(format!("author {id} deleted"))))
}

/// GET /authors/{id}/articles
pub async fn author_articles<R: NewsRepository>(
    State(state): State<NewsAppState<R>>,
    Path(id): Path<String>,
) -> NewsResult<Json<DataResponse<ArticleResponse>>> {
    let articles = state.authors().articles(path_id(&id)?).await?;

    Ok(Json(DataResponse {
        data: articles.into_iter().map(ArticleResponse::from).collect(),
    }))
}

// ============================================================================
// Articles
// ============================================================================

/// GET /articles
pub async fn list_articles<R: NewsRepository>(
    State(state): State<NewsAppState<R>>,
) -> NewsResult<Json<DataResponse<ArticleResponse>>> {
    let articles = state.articles().list().await?;

    Ok(Json(DataResponse {
        data: articles.into_iter().map(ArticleResponse::from).collect(),
    }))
}

/// POST /articles
pub async fn create_article<R: NewsRepository>(
    State(state): State<NewsAppState<R>>,
    Json(req): Json<CreateArticleRequest>,
) -> NewsResult<Created> {
    if req.author_id <= 0 {
        return Err(NewsError::Validation("author_id must be positive".to_string()));
    }
    let id = state.articles().create(req.into()).await?;
    Ok(created(id.as_i64()))
}

/// GET /articles/{id}
pub async fn get_article<R: NewsRepository>(
    State(state): State<NewsAppState<R>>,
    Path(id): Path<String>,
) -> NewsResult<Json<ArticleEnvelope>> {
    let article = state.articles().get(path_id(&id)?).await?;

    Ok(Json(ArticleEnvelope {
        article: article.into(),
    }))
}

/// PUT /articles/{id}
pub async fn update_article<R: NewsRepository>(
    State(state): State<NewsAppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateArticleRequest>,
) -> NewsResult<Json<StatusResponse>> {
    let id: ArticleId = path_id(&id)?;
    state.articles().update(id, req.into()).await?;
    Ok(Json(StatusResponse::new(format!("article {id} updated"))))
}

/// DELETE /articles/{id}
pub async fn delete_article<R: NewsRepository>(
    State(state): State<NewsAppState<R>>,
    Path(id): Path<String>,
) -> NewsResult<Json<StatusResponse>> {
    let id: ArticleId = path_id(&id)?;
    state.articles().delete(id).await?;
    Ok(Json(StatusResponse::new(format!("article {id} deleted"))))
}

// ============================================================================
// Bookmarks
// ============================================================================

/// POST /articles/{id}/bookmark
pub async fn add_bookmark<R: NewsRepository>(
    State(state): State<NewsAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> NewsResult<Json<StatusResponse>> {
    let id: ArticleId = path_id(&id)?;
    state.bookmarks().add(user.user_id(), id).await?;
    Ok(Json(StatusResponse::new(format!("article {id} bookmarked"))))
}

/// GET /bookmarks
pub async fn list_bookmarks<R: NewsRepository>(
    State(state): State<NewsAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> NewsResult<Json<DataResponse<ArticleResponse>>> {
    let articles = state.bookmarks().list(user.user_id()).await?;

    Ok(Json(DataResponse {
        data: articles.into_iter().map(ArticleResponse::from).collect(),
    }))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn created(id: i64) -> Created {
    (StatusCode::CREATED, Json(CreatedResponse { id }))
}

/// Parse a path segment as a positive id
fn path_id<T>(raw: &str) -> NewsResult<Id<T>> {
    match raw.parse::<Id<T>>() {
        Ok(id) if id.as_i64() > 0 => Ok(id),
        _ => Err(NewsError::Validation(format!("invalid id: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_id() {
        let id: AuthorId = path_id("42").unwrap();
        assert_eq!(id.as_i64(), 42);

        for raw in ["0", "-1", "abc", "", "1.5"] {
            assert!(path_id::<kernel::id::markers::Author>(raw).is_err(), "{raw}");
        }
    }
}
