//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use kernel::id::{ArticleId, AuthorId, UserId};

use crate::domain::entities::{
    Article, ArticleChanges, ArticleView, Author, AuthorChanges, NewArticle, NewAuthor,
};
use crate::domain::repository::{ArticleRepository, AuthorRepository, BookmarkRepository};
use crate::domain::value_objects::{ArticleContent, ArticleTitle, PersonName};
use crate::error::{NewsError, NewsResult};

/// PostgreSQL-backed news repository
#[derive(Clone)]
pub struct PgNewsRepository {
    pool: PgPool,
}

impl PgNewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Columns of `ArticleViewRow`; requires `articles a JOIN authors au`
const ARTICLE_VIEW_COLUMNS: &str = r#"
    a.id, CONCAT(au.name, ' ', au.surname) AS author, a.title, a.content, a.created_at
"#;

// ============================================================================
// Author Repository Implementation
// ============================================================================

impl AuthorRepository for PgNewsRepository {
    async fn create(&self, author: &NewAuthor) -> NewsResult<Author> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            INSERT INTO authors (name, surname)
            VALUES ($1, $2)
            RETURNING id, name, surname
            "#,
        )
        .bind(author.name.as_str())
        .bind(author.surname.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_author())
    }

    async fn list(&self) -> NewsResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, name, surname FROM authors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AuthorRow::into_author).collect())
    }

    async fn find_by_id(&self, id: AuthorId) -> NewsResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, name, surname FROM authors WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthorRow::into_author))
    }

    async fn update(&self, id: AuthorId, changes: &AuthorChanges) -> NewsResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            UPDATE authors
            SET name = COALESCE($2, name),
                surname = COALESCE($3, surname)
            WHERE id = $1
            RETURNING id, name, surname
            "#,
        )
        .bind(id.as_i64())
        .bind(changes.name.as_ref().map(PersonName::as_str))
        .bind(changes.surname.as_ref().map(PersonName::as_str))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthorRow::into_author))
    }

    async fn delete(&self, id: AuthorId) -> NewsResult<bool> {
        // articles and their bookmarks go with the author (ON DELETE CASCADE)
        let deleted = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn list_articles(&self, id: AuthorId) -> NewsResult<Vec<ArticleView>> {
        let rows = sqlx::query_as::<_, ArticleViewRow>(&format!(
            r#"
            SELECT {ARTICLE_VIEW_COLUMNS}
            FROM articles a
            JOIN authors au ON au.id = a.author_id
            WHERE a.author_id = $1
            ORDER BY a.created_at, a.id
            "#
        ))
        .bind(id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ArticleViewRow::into_view).collect())
    }
}

// ============================================================================
// Article Repository Implementation
// ============================================================================

impl ArticleRepository for PgNewsRepository {
    async fn create(&self, article: &NewArticle) -> NewsResult<Article> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            INSERT INTO articles (author_id, title, content, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, title, content, created_at
            "#,
        )
        .bind(article.author_id.as_i64())
        .bind(article.title.as_str())
        .bind(article.content.as_str())
        .bind(article.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| foreign_key_or(e, "articles_author_id_fkey", NewsError::AuthorNotFound))?;

        Ok(row.into_article())
    }

    async fn list(&self) -> NewsResult<Vec<ArticleView>> {
        let rows = sqlx::query_as::<_, ArticleViewRow>(&format!(
            r#"
            SELECT {ARTICLE_VIEW_COLUMNS}
            FROM articles a
            JOIN authors au ON au.id = a.author_id
            ORDER BY a.created_at, a.id
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ArticleViewRow::into_view).collect())
    }

    async fn find_by_id(&self, id: ArticleId) -> NewsResult<Option<ArticleView>> {
        let row = sqlx::query_as::<_, ArticleViewRow>(&format!(
            r#"
            SELECT {ARTICLE_VIEW_COLUMNS}
            FROM articles a
            JOIN authors au ON au.id = a.author_id
            WHERE a.id = $1
            "#
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ArticleViewRow::into_view))
    }

    async fn update(&self, id: ArticleId, changes: &ArticleChanges) -> NewsResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE articles
            SET title = COALESCE($2, title),
                content = COALESCE($3, content)
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(changes.title.as_ref().map(ArticleTitle::as_str))
        .bind(changes.content.as_ref().map(ArticleContent::as_str))
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, id: ArticleId) -> NewsResult<bool> {
        let deleted = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Bookmark Repository Implementation
// ============================================================================

impl BookmarkRepository for PgNewsRepository {
    async fn add(&self, user_id: UserId, article_id: ArticleId) -> NewsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookmarks (user_id, article_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, article_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_i64())
        .bind(article_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| foreign_key_or(e, "bookmarks_article_id_fkey", NewsError::ArticleNotFound))?;

        Ok(())
    }

    async fn list(&self, user_id: UserId) -> NewsResult<Vec<ArticleView>> {
        let rows = sqlx::query_as::<_, ArticleViewRow>(&format!(
            r#"
            SELECT {ARTICLE_VIEW_COLUMNS}
            FROM bookmarks b
            JOIN articles a ON a.id = b.article_id
            JOIN authors au ON au.id = a.author_id
            WHERE b.user_id = $1
            ORDER BY b.created_at, a.id
            "#
        ))
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ArticleViewRow::into_view).collect())
    }
}

/// Swap a violation of `constraint` for the domain's not-found error
fn foreign_key_or(err: sqlx::Error, constraint: &str, not_found: NewsError) -> NewsError {
    match &err {
        sqlx::Error::Database(db)
            if db.is_foreign_key_violation() && db.constraint() == Some(constraint) =>
        {
            not_found
        }
        _ => NewsError::Database(err),
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    name: String,
    surname: String,
}

impl AuthorRow {
    fn into_author(self) -> Author {
        Author {
            id: AuthorId::from_i64(self.id),
            name: PersonName::from_db(self.name),
            surname: PersonName::from_db(self.surname),
        }
    }
}

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    author_id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl ArticleRow {
    fn into_article(self) -> Article {
        Article {
            id: ArticleId::from_i64(self.id),
            author_id: AuthorId::from_i64(self.author_id),
            title: ArticleTitle::from_db(self.title),
            content: ArticleContent::from_db(self.content),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ArticleViewRow {
    id: i64,
    author: String,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl ArticleViewRow {
    fn into_view(self) -> ArticleView {
        ArticleView {
            id: ArticleId::from_i64(self.id),
            author: self.author,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
        }
    }
}
