//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, AuthorId};

use crate::domain::value_objects::{ArticleContent, ArticleTitle, PersonName};

// ============================================================================
// Author
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: AuthorId,
    pub name: PersonName,
    pub surname: PersonName,
}

impl Author {
    /// "name surname", as shown on articles
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub name: PersonName,
    pub surname: PersonName,
}

/// Partial author update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct AuthorChanges {
    pub name: Option<PersonName>,
    pub surname: Option<PersonName>,
}

impl AuthorChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.surname.is_none()
    }
}

// ============================================================================
// Article
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub author_id: AuthorId,
    pub title: ArticleTitle,
    pub content: ArticleContent,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub author_id: AuthorId,
    pub title: ArticleTitle,
    pub content: ArticleContent,
    pub created_at: DateTime<Utc>,
}

/// Partial article update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ArticleChanges {
    pub title: Option<ArticleTitle>,
    pub content: Option<ArticleContent>,
}

impl ArticleChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Article joined with its author's display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleView {
    pub id: ArticleId,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ArticleView {
    pub fn new(article: &Article, author: &Author) -> Self {
        Self {
            id: article.id,
            author: author.full_name(),
            title: article.title.to_string(),
            content: article.content.to_string(),
            created_at: article.created_at,
        }
    }
}
