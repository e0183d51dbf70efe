//! Error conversions
//!
//! `From` implementations into [`AppError`] and the axum response rendering.

use super::app_error::AppError;
use super::kind::ErrorKind;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind as IoKind;

        match err.kind() {
            IoKind::NotFound => AppError::not_found("Resource not found").with_source(err),
            IoKind::TimedOut => {
                AppError::new(ErrorKind::RequestTimeout, "I/O timed out").with_source(err)
            }
            _ => AppError::internal("I/O error").with_source(err),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_request(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

/// Classify a driver error by SQLSTATE.
///
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
#[cfg(feature = "sqlx")]
pub fn classify_sqlx_error(err: &sqlx::Error) -> (ErrorKind, &'static str) {
    match err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found"),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            (ErrorKind::ServiceUnavailable, "Database connection pool unavailable")
        }
        sqlx::Error::Io(_) => (ErrorKind::ServiceUnavailable, "Database connection error"),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") => (ErrorKind::Conflict, "Duplicate key value"),
            Some("23503") => (ErrorKind::Conflict, "Foreign key violation"),
            Some("23502") => (ErrorKind::BadRequest, "Required field is null"),
            Some("23514") => (ErrorKind::BadRequest, "Check constraint violation"),
            Some("57014") => (ErrorKind::RequestTimeout, "Database statement cancelled"),
            Some("53000" | "53100" | "53200" | "53300" | "57P01" | "57P02" | "57P03") => {
                (ErrorKind::ServiceUnavailable, "Database unavailable")
            }
            _ => (ErrorKind::InternalServerError, "Database error"),
        },
        _ => (ErrorKind::InternalServerError, "Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = classify_sqlx_error(&err);
        AppError::new(kind, message).with_source(err)
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}
