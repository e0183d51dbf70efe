//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::service::AuthService;
use crate::domain::repository::{CredentialStore, SessionStore};
use crate::error::AuthResult;
use crate::presentation::handlers::{self, AuthAppState};

/// Create an Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> AuthResult<Router>
where
    R: CredentialStore + SessionStore + Send + Sync + 'static,
{
    let service = AuthService::new(repo, config)?;
    Ok(auth_router_with_service(Arc::new(service)))
}

/// Router over an existing service, for callers that also need its codec
pub fn auth_router_with_service<R>(service: Arc<AuthService<R>>) -> Router
where
    R: CredentialStore + SessionStore + Send + Sync + 'static,
{
    let state = AuthAppState { service };

    Router::new()
        .route("/sign-up", post(handlers::sign_up::<R>))
        .route("/sign-in", post(handlers::sign_in::<R>))
        .route("/refresh", get(handlers::refresh::<R>))
        .route("/sign-out", post(handlers::sign_out::<R>))
        .with_state(state)
}
