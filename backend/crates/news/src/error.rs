//! News Error Types
//!
//! News-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use thiserror::Error;

/// News-specific result type alias
pub type NewsResult<T> = Result<T, NewsError>;

/// News-specific error variants
#[derive(Debug, Error)]
pub enum NewsError {
    /// Malformed author or article input
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Author not found")]
    AuthorNotFound,

    #[error("Article not found")]
    ArticleNotFound,

    /// Update request carrying no fields
    #[error("Update has no fields to change")]
    EmptyUpdate,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl NewsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            NewsError::Validation(_) | NewsError::EmptyUpdate => ErrorKind::BadRequest,
            NewsError::AuthorNotFound | NewsError::ArticleNotFound => ErrorKind::NotFound,
            NewsError::Database(e) => classify_sqlx_error(e).0,
            NewsError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            NewsError::Database(e) => {
                let (kind, message) = classify_sqlx_error(e);
                AppError::new(kind, message)
            }
            NewsError::Internal(_) => AppError::internal("Internal server error"),
            NewsError::EmptyUpdate => AppError::new(self.kind(), self.to_string())
                .with_action("Send at least one field to change"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            NewsError::Database(e) => {
                if self.kind().is_server_error() {
                    tracing::error!(error = %e, "News database error");
                } else {
                    tracing::warn!(error = %e, "News database rejected write");
                }
            }
            NewsError::Internal(msg) => {
                tracing::error!(message = %msg, "News internal error");
            }
            _ => {
                tracing::debug!(error = %self, "News error");
            }
        }
    }
}

impl IntoResponse for NewsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for NewsError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            NewsError::Internal(err.to_string())
        } else {
            NewsError::Validation(err.message().to_string())
        }
    }
}
