//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::issue_tokens::TokenPair;
use crate::application::service::AuthService;
use crate::domain::repository::{CredentialStore, SessionStore};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{SignInRequest, SignUpRequest, StatusResponse, TokenResponse};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: CredentialStore + SessionStore + Send + Sync + 'static,
{
    pub service: Arc<AuthService<R>>,
}

impl<R> Clone for AuthAppState<R>
where
    R: CredentialStore + SessionStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /auth/sign-up
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<Json<StatusResponse>>
where
    R: CredentialStore + SessionStore + Send + Sync + 'static,
{
    state
        .service
        .sign_up(req.name, req.email, req.password)
        .await?;

    Ok(Json(StatusResponse::success()))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /auth/sign-in
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: CredentialStore + SessionStore + Send + Sync + 'static,
{
    let pair = state.service.sign_in(req.email, req.password).await?;
    token_response(state.service.config(), pair)
}

// ============================================================================
// Refresh
// ============================================================================

/// GET /auth/refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: CredentialStore + SessionStore + Send + Sync + 'static,
{
    let presented = platform::cookie::extract_cookie(
        &headers,
        &state.service.config().refresh_cookie_name,
    )
    .ok_or(AuthError::SessionNotFound)?;

    let pair = state.service.refresh_tokens(&presented).await?;
    token_response(state.service.config(), pair)
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /auth/sign-out
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: CredentialStore + SessionStore + Send + Sync + 'static,
{
    let cookie_config = state.service.config().refresh_cookie();

    if let Some(token) = platform::cookie::extract_cookie(&headers, &cookie_config.name) {
        // Ignore errors - just clear the cookie
        if let Err(e) = state.service.sign_out(&token).await {
            tracing::debug!(error = %e, "Sign-out could not drop session");
        }
    }

    let cookie = cookie_config
        .delete_cookie_header()
        .map_err(|e| AuthError::Internal(e.to_string()))?;

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Helper Functions
// ============================================================================

type TokenReply = (StatusCode, [(HeaderName, HeaderValue); 1], Json<TokenResponse>);

/// Access token in the body, refresh token in the cookie
fn token_response(config: &AuthConfig, pair: TokenPair) -> AuthResult<TokenReply> {
    let cookie = config
        .refresh_cookie()
        .set_cookie_header(pair.refresh_token.as_str())
        .map_err(|e| AuthError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(TokenResponse {
            token: pair.access_token,
        }),
    ))
}
