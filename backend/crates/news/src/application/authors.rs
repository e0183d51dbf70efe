//! Author Service

use std::sync::Arc;

use kernel::id::AuthorId;

use crate::domain::entities::{ArticleView, Author, AuthorChanges, NewAuthor};
use crate::domain::repository::AuthorRepository;
use crate::domain::value_objects::PersonName;
use crate::error::{NewsError, NewsResult};

pub struct CreateAuthorInput {
    pub name: String,
    pub surname: String,
}

/// Fields left `None` are kept
#[derive(Default)]
pub struct UpdateAuthorInput {
    pub name: Option<String>,
    pub surname: Option<String>,
}

pub struct AuthorService<R>
where
    R: AuthorRepository,
{
    repo: Arc<R>,
}

impl<R> AuthorService<R>
where
    R: AuthorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CreateAuthorInput) -> NewsResult<AuthorId> {
        let author = NewAuthor {
            name: PersonName::new("name", &input.name)?,
            surname: PersonName::new("surname", &input.surname)?,
        };

        let created = self.repo.create(&author).await?;
        tracing::info!(author_id = %created.id, "Author created");

        Ok(created.id)
    }

    pub async fn list(&self) -> NewsResult<Vec<Author>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: AuthorId) -> NewsResult<Author> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(NewsError::AuthorNotFound)
    }

    pub async fn update(&self, id: AuthorId, input: UpdateAuthorInput) -> NewsResult<Author> {
        let changes = AuthorChanges {
            name: input
                .name
                .map(|n| PersonName::new("name", n))
                .transpose()?,
            surname: input
                .surname
                .map(|s| PersonName::new("surname", s))
                .transpose()?,
        };
        if changes.is_empty() {
            return Err(NewsError::EmptyUpdate);
        }

        let author = self
            .repo
            .update(id, &changes)
            .await?
            .ok_or(NewsError::AuthorNotFound)?;
        tracing::info!(author_id = %id, "Author updated");

        Ok(author)
    }

    pub async fn delete(&self, id: AuthorId) -> NewsResult<()> {
        if !self.repo.delete(id).await? {
            return Err(NewsError::AuthorNotFound);
        }
        tracing::info!(author_id = %id, "Author deleted");
        Ok(())
    }

    /// Articles by one author; an unknown author is an error, not an empty list
    pub async fn articles(&self, id: AuthorId) -> NewsResult<Vec<ArticleView>> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(NewsError::AuthorNotFound);
        }
        self.repo.list_articles(id).await
    }
}
