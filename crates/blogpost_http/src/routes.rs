//! Router assembly.
//!
//! Routes:
//! - GET  /ping
//! - GET  /api/posts
//! - POST /api/posts
//! - GET  /api/posts/{id}
//! - POST /api/posts/{id}/comments

use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;

/// Builds the full application router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/api", post_routes())
        .with_state(state)
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(handlers::get_all_posts).post(handlers::create_post),
        )
        .route("/posts/{id}", get(handlers::get_post))
        .route("/posts/{id}/comments", post(handlers::create_comment))
}
