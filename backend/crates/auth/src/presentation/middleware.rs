//! Auth Middleware
//!
//! Bearer access-token check for protected routes. Purely cryptographic; no
//! store is consulted.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::access_token::AccessTokenCodec;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Caller identity inserted into request extensions by [`require_access_token`]
///
/// Handlers read it with `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

/// Middleware that requires `Authorization: Bearer <access token>`
///
/// ```ignore
/// let protected = Router::new()
///     .route("/articles", get(list_articles))
///     .layer(axum::middleware::from_fn_with_state(codec, require_access_token));
/// ```
pub async fn require_access_token(
    State(codec): State<Arc<AccessTokenCodec>>,
    mut req: Request<Body>,
    next: Next,
) -> AuthResult<Response> {
    let token = bearer_token(req.headers())?;
    let user_id = codec.verify(token)?;

    req.extensions_mut().insert(AuthenticatedUser(user_id));

    Ok(next.run(req).await)
}

/// Pull the token out of the Authorization header
fn bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AuthError::MissingHeader("Authorization".to_string()))?;

    let value = value.to_str().map_err(|_| AuthError::InvalidToken)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::InvalidToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidToken);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidToken);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(&headers("bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingHeader(_))
        ));
    }

    #[test]
    fn test_malformed_header() {
        for value in ["Bearer", "Bearer ", "Basic abc", "abc"] {
            assert!(
                matches!(bearer_token(&headers(value)), Err(AuthError::InvalidToken)),
                "{value} should be rejected"
            );
        }
    }
}
