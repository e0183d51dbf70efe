//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed sign-up or sign-in input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unknown email or wrong password, deliberately indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No stored session for the presented refresh token
    #[error("Refresh session not found")]
    SessionNotFound,

    /// The refresh session existed but had expired; it is gone now
    #[error("Refresh session expired")]
    SessionExpired,

    /// Access token failed verification
    #[error("Invalid access token")]
    InvalidToken,

    /// Credential or session store failure
    #[error("Store error: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// Token encoding, hashing or other local failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::SessionNotFound
            | AuthError::SessionExpired
            | AuthError::InvalidToken
            | AuthError::MissingHeader(_) => ErrorKind::Unauthorized,
            AuthError::StoreUnavailable(e) => classify_sqlx_error(e).0,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Store and internal details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::StoreUnavailable(e) => {
                let (kind, message) = classify_sqlx_error(e);
                AppError::new(kind, message)
            }
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            AuthError::SessionNotFound | AuthError::SessionExpired => {
                AppError::new(self.kind(), self.to_string()).with_action("Sign in again")
            }
            AuthError::MissingHeader(_) => AppError::new(self.kind(), self.to_string())
                .with_action("Send an Authorization: Bearer <token> header"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::StoreUnavailable(e) => {
                if self.kind().is_server_error() {
                    tracing::error!(error = %e, "Auth store error");
                } else {
                    tracing::warn!(error = %e, "Auth store rejected write");
                }
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid sign-in attempt");
            }
            AuthError::SessionExpired => {
                tracing::info!("Expired refresh session presented");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::Validation(err.message().to_string())
        }
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
