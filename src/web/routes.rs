//! Page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    generate_handler, home_handler, post_handler, posts_handler, resume_handler,
};
use axum::{Router, routing::get};

/// Content pages.
///
/// # Endpoints
///
/// - `GET /`           - Home
/// - `GET /posts`      - Blog index
/// - `GET /posts/{id}` - Blog post
/// - `GET /resume`     - Resume
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/posts", get(posts_handler))
        .route("/posts/{id}", get(post_handler))
        .route("/resume", get(resume_handler))
}

/// Pages that read the caller's drawer.
///
/// Requires [`crate::api::middleware::session::lookup_layer`].
///
/// # Endpoints
///
/// - `GET /generate` - Image generation playground
pub fn drawer_page_routes() -> Router<AppState> {
    Router::new().route("/generate", get(generate_handler))
}
