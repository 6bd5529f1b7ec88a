//! Top-level router configuration combining API and page routes.
//!
//! # Route Structure
//!
//! - `GET  /`, `/posts`, `/posts/{id}`, `/resume` - Content pages
//! - `GET  /generate`    - Image generation playground (drawer session)
//! - `GET  /health`      - Health check (public)
//! - `/api/*`            - JSON API (drawer routes use the session cookie)
//! - `/static/*`         - Static assets
//! - `/img/*`            - Images, including the test-mode samples
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api/images/generate`
//! - **Drawer session** - `drawer_session` cookie, issued on first submission
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, session, tracing};
use crate::config::Config;
use crate::state::AppState;
use crate::web;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the router without path normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
///
/// Rate-limited routes need `ConnectInfo<SocketAddr>`; serve with
/// `into_make_service_with_connect_info`.
pub fn build_router(state: AppState, behind_proxy: bool) -> Router {
    let new_session = middleware::from_fn_with_state(state.clone(), session::layer);
    let existing_session = middleware::from_fn_with_state(state.clone(), session::lookup_layer);

    let drawer_api = Router::new()
        .merge(api::routes::drawer_submit_routes().route_layer(new_session))
        .merge(api::routes::drawer_routes().route_layer(existing_session.clone()));

    let api_router = Router::new()
        .merge(rate_limit::apply(api::routes::image_routes(), behind_proxy))
        .merge(drawer_api);

    let drawer_pages = web::routes::drawer_page_routes().route_layer(existing_session);

    let static_dir = state.static_dir.as_ref().clone();

    Router::new()
        .merge(web::routes::page_routes())
        .merge(drawer_pages)
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .nest_service("/static", ServeDir::new(&static_dir))
        .nest_service("/img", ServeDir::new(static_dir.join("img")))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, config.behind_proxy))
}
