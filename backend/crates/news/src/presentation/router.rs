//! News Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::NewsRepository;
use crate::presentation::handlers::{self, NewsAppState};

/// Create the news router for any repository implementation
///
/// Handlers read the caller from `AuthenticatedUser`, so the router must be
/// layered with `auth::middleware::require_access_token`.
pub fn news_router<R: NewsRepository>(repo: R) -> Router {
    let state = NewsAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/authors",
            get(handlers::list_authors::<R>).post(handlers::create_author::<R>),
        )
        .route(
            "/authors/{id}",
            get(handlers::get_author::<R>)
                .put(handlers::update_author::<R>)
                .delete(handlers::delete_author::<R>),
        )
        .route("/authors/{id}/articles", get(handlers::author_articles::<R>))
        .route(
            "/articles",
            get(handlers::list_articles::<R>).post(handlers::create_article::<R>),
        )
        .route(
            "/articles/{id}",
            get(handlers::get_article::<R>)
                .put(handlers::update_article::<R>)
                .delete(handlers::delete_article::<R>),
        )
        .route("/articles/{id}/bookmark", post(handlers::add_bookmark::<R>))
        .route("/bookmarks", get(handlers::list_bookmarks::<R>))
        .with_state(state)
}
