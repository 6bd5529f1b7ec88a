//! API route configuration.
//!
//! Drawer routes need [`crate::api::middleware::session`]: [`drawer_submit_routes`]
//! with `layer`, [`drawer_routes`] with `lookup_layer`. The stateless
//! [`image_routes`] are rate limited where they are mounted; drawer
//! submissions are not.

use crate::api::handlers::{
    close_viewer_handler, dismiss_entry_handler, download_entry_handler, drawer_handler,
    generate_image_handler, open_viewer_handler, submit_entry_handler, viewer_next_handler,
    viewer_previous_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Stateless generation action.
///
/// # Endpoints
///
/// - `POST /images/generate` - Generate and wait for one image
pub fn image_routes() -> Router<AppState> {
    Router::new().route("/images/generate", post(generate_image_handler))
}

/// Drawer submission, the only route that starts a session.
///
/// # Endpoints
///
/// - `POST /drawer/entries` - Queue a generation in the caller's drawer
pub fn drawer_submit_routes() -> Router<AppState> {
    Router::new().route("/drawer/entries", post(submit_entry_handler))
}

/// Drawer routes that work on an existing session only.
///
/// # Endpoints
///
/// - `GET    /drawer`                       - Entries and viewer state
/// - `DELETE /drawer/entries/{id}`          - Dismiss an entry
/// - `GET    /drawer/entries/{id}/download` - Download a completed image
/// - `POST   /drawer/viewer/open`           - Open the viewer on an entry
/// - `POST   /drawer/viewer/next`           - Next entry (wraps)
/// - `POST   /drawer/viewer/previous`       - Previous entry (wraps)
/// - `DELETE /drawer/viewer`                - Close the viewer
pub fn drawer_routes() -> Router<AppState> {
    Router::new()
        .route("/drawer", get(drawer_handler))
        .route("/drawer/entries/{id}", delete(dismiss_entry_handler))
        .route("/drawer/entries/{id}/download", get(download_entry_handler))
        .route("/drawer/viewer/open", post(open_viewer_handler))
        .route("/drawer/viewer/next", post(viewer_next_handler))
        .route("/drawer/viewer/previous", post(viewer_previous_handler))
        .route("/drawer/viewer", delete(close_viewer_handler))
}
