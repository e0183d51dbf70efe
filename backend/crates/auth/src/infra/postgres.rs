//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use platform::password::HashedPassword;

use crate::domain::entity::{
    refresh_session::{NewRefreshSession, RefreshSession},
    user::{NewUser, User},
};
use crate::domain::repository::{CredentialStore, SessionStore};
use crate::domain::value_object::{
    UserId, email::Email, refresh_token::RefreshToken, user_name::UserName,
};
use crate::error::{AuthError, AuthResult};
use kernel::id::RefreshSessionId;

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Credential Store Implementation
// ============================================================================

impl CredentialStore for PgAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_user())
    }

    async fn find_by_credentials(
        &self,
        email: &Email,
        password_hash: &HashedPassword,
    ) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE email = $1 AND password_hash = $2
            "#,
        )
        .bind(email.as_str())
        .bind(password_hash.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }
}

// ============================================================================
// Session Store Implementation
// ============================================================================

impl SessionStore for PgAuthRepository {
    async fn create(&self, session: &NewRefreshSession) -> AuthResult<RefreshSession> {
        // user_id is UNIQUE: a new session replaces the old row in place
        let row = sqlx::query_as::<_, RefreshSessionRow>(
            r#"
            INSERT INTO refresh_tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
                SET token = EXCLUDED.token,
                    expires_at = EXCLUDED.expires_at
            RETURNING id, user_id, token, expires_at
            "#,
        )
        .bind(session.user_id.as_i64())
        .bind(session.token.as_str())
        .bind(session.expires_at)
        .fetch_one(&self.pool)
        .await?;

        row.into_session()
    }

    async fn consume_by_token(&self, token: &RefreshToken) -> AuthResult<Option<RefreshSession>> {
        // Single statement: the row lock makes a concurrent consumer see nothing
        let row = sqlx::query_as::<_, RefreshSessionRow>(
            r#"
            DELETE FROM refresh_tokens
            WHERE token = $1
            RETURNING id, user_id, token, expires_at
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(RefreshSessionRow::into_session).transpose()
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: UserId::from_i64(self.id),
            name: UserName::from_db(self.name),
            email: Email::from_db(self.email),
        }
    }
}

#[derive(sqlx::FromRow)]
struct RefreshSessionRow {
    id: i64,
    user_id: i64,
    token: String,
    expires_at: DateTime<Utc>,
}

impl RefreshSessionRow {
    fn into_session(self) -> AuthResult<RefreshSession> {
        let token = RefreshToken::parse(&self.token)
            .map_err(|e| AuthError::Internal(format!("Invalid stored refresh token: {}", e)))?;

        Ok(RefreshSession {
            id: RefreshSessionId::from_i64(self.id),
            user_id: UserId::from_i64(self.user_id),
            token,
            expires_at: self.expires_at,
        })
    }
}

/// Run against a migrated database:
/// `DATABASE_URL=postgres://... cargo test -p auth -- --ignored`
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn repo_with_user() -> Option<(PgAuthRepository, User)> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = PgPool::connect(&url).await.unwrap();
        let repo = PgAuthRepository::new(pool);

        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let user = NewUser {
            name: UserName::new("Ada").unwrap(),
            email: Email::new(format!("pg-{nanos}@example.com")).unwrap(),
            password_hash: HashedPassword::from_db("a".repeat(64)).unwrap(),
        };
        let user = CredentialStore::create(&repo, &user).await.unwrap();
        Some((repo, user))
    }

    async fn drop_user(repo: &PgAuthRepository, user: &User) {
        // refresh_tokens rows go with the user (ON DELETE CASCADE)
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.id.as_i64())
            .execute(&repo.pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_new_session_replaces_previous_row() {
        let Some((repo, user)) = repo_with_user().await else {
            return;
        };

        let first = NewRefreshSession::issue(user.id, Duration::hours(12), Utc::now());
        let second = NewRefreshSession::issue(user.id, Duration::hours(12), Utc::now());
        let stored_first = SessionStore::create(&repo, &first).await.unwrap();
        let stored_second = SessionStore::create(&repo, &second).await.unwrap();

        assert_eq!(stored_first.id, stored_second.id);
        assert_eq!(stored_second.token, second.token);
        assert!(repo.consume_by_token(&first.token).await.unwrap().is_none());

        let consumed = repo.consume_by_token(&second.token).await.unwrap().unwrap();
        assert_eq!(consumed.user_id, user.id);
        assert!(repo.consume_by_token(&second.token).await.unwrap().is_none());

        drop_user(&repo, &user).await;
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_concurrent_consume_has_one_winner() {
        let Some((repo, user)) = repo_with_user().await else {
            return;
        };

        let session = NewRefreshSession::issue(user.id, Duration::hours(12), Utc::now());
        SessionStore::create(&repo, &session).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                let token = session.token.clone();
                tokio::spawn(async move { repo.consume_by_token(&token).await })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().is_some() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);

        drop_user(&repo, &user).await;
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_cleanup_removes_expired_session() {
        let Some((repo, user)) = repo_with_user().await else {
            return;
        };

        let stale = NewRefreshSession::issue(
            user.id,
            Duration::hours(12),
            Utc::now() - Duration::hours(13),
        );
        SessionStore::create(&repo, &stale).await.unwrap();

        assert!(repo.cleanup_expired().await.unwrap() >= 1);
        assert!(repo.consume_by_token(&stale.token).await.unwrap().is_none());

        drop_user(&repo, &user).await;
    }
}
