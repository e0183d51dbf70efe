//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{
    CreateArticleInput, CreateAuthorInput, UpdateArticleInput, UpdateAuthorInput,
};
use crate::domain::entities::{ArticleView, Author};
use kernel::id::AuthorId;

// ============================================================================
// Envelopes
// ============================================================================

/// List body: `{"data": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

/// Id of a freshly created row
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

// ============================================================================
// Authors
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuthorRequest {
    pub name: String,
    pub surname: String,
}

impl From<CreateAuthorRequest> for CreateAuthorInput {
    fn from(req: CreateAuthorRequest) -> Self {
        Self {
            name: req.name,
            surname: req.surname,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAuthorRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
}

impl From<UpdateAuthorRequest> for UpdateAuthorInput {
    fn from(req: UpdateAuthorRequest) -> Self {
        Self {
            name: req.name,
            surname: req.surname,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub name: String,
    pub surname: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.as_i64(),
            name: author.name.to_string(),
            surname: author.surname.to_string(),
        }
    }
}

// ============================================================================
// Articles
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticleRequest {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<CreateArticleRequest> for CreateArticleInput {
    fn from(req: CreateArticleRequest) -> Self {
        Self {
            author_id: AuthorId::from_i64(req.author_id),
            title: req.title,
            content: req.content,
            created_at: req.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<UpdateArticleRequest> for UpdateArticleInput {
    fn from(req: UpdateArticleRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

/// Article with its author rendered as "name surname"
#[derive(Debug, Clone, Serialize)]
pub struct ArticleResponse {
    pub id: i64,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<ArticleView> for ArticleResponse {
    fn from(view: ArticleView) -> Self {
        Self {
            id: view.id.as_i64(),
            author: view.author,
            title: view.title,
            content: view.content,
            created_at: view.created_at,
        }
    }
}

/// Single article body: `{"article": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct ArticleEnvelope {
    pub article: ArticleResponse,
}
