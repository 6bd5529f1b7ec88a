//! Handlers for the per-session image drawer.

use axum::{
    Extension, Json,
    body::Body,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::path::{Component, Path as FsPath};
use validator::Validate;

use crate::api::dto::images::{DrawerResponse, GenerateImageRequest, OpenViewerRequest};
use crate::api::middleware::session::DrawerSession;
use crate::application::services::{Drawer, DrawerError, ViewerState};
use crate::domain::entities::GeneratedImageRequest;
use crate::error::AppError;
use crate::state::AppState;

/// The caller's drawer, if a session exists.
type MaybeSession = Option<Extension<DrawerSession>>;

fn drawer_response(drawer: &Drawer) -> DrawerResponse {
    let snapshot = drawer.snapshot();
    let pending = snapshot
        .entries
        .iter()
        .filter(|e| e.state.is_pending())
        .count();

    DrawerResponse {
        entries: snapshot.entries,
        viewer: snapshot.viewer,
        pending,
    }
}

/// Lists the caller's drawer entries and viewer position.
///
/// # Endpoint
///
/// `GET /api/drawer`
///
/// # Response
///
/// ```json
/// {
///   "entries": [
///     {
///       "id": 1,
///       "prompt": "TEST: a cat astronaut",
///       "test_mode": true,
///       "status": "completed",
///       "url": "/img/test/woods.png",
///       "submitted_at": "2024-01-05T10:00:00Z"
///     }
///   ],
///   "viewer": null,
///   "pending": 0
/// }
/// ```
///
/// Without a session the drawer is reported empty and no session is created.
pub async fn drawer_handler(session: MaybeSession) -> Json<DrawerResponse> {
    match session {
        Some(Extension(session)) => Json(drawer_response(&session.drawer)),
        None => Json(DrawerResponse {
            entries: Vec::new(),
            viewer: None,
            pending: 0,
        }),
    }
}

/// Submits a prompt to the drawer.
///
/// # Endpoint
///
/// `POST /api/drawer/entries`
///
/// # Response
///
/// `202 Accepted` with the new entry in `pending` state. Generation runs in
/// the background; poll `GET /api/drawer` for the outcome. This is the only
/// drawer route that starts a session.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
pub async fn submit_entry_handler(
    Extension(session): Extension<DrawerSession>,
    Json(payload): Json<GenerateImageRequest>,
) -> Result<(StatusCode, Json<GeneratedImageRequest>), AppError> {
    payload.validate()?;

    let entry = session
        .drawer
        .submit(&payload.prompt, payload.credential, payload.test);

    Ok((StatusCode::ACCEPTED, Json(entry)))
}

/// Removes an entry in any state.
///
/// # Endpoint
///
/// `DELETE /api/drawer/entries/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the entry does not exist.
pub async fn dismiss_entry_handler(
    session: MaybeSession,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let Some(Extension(session)) = session else {
        return Err(DrawerError::EntryNotFound(id).into());
    };
    session.drawer.dismiss(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Downloads a completed image as an attachment.
///
/// # Endpoint
///
/// `GET /api/drawer/entries/{id}/download`
///
/// # Response
///
/// Image bytes with `Content-Disposition: attachment;
/// filename="GeneratedImage-<timestamp>.png"`. Local sample images are read
/// from the static directory; remote images are fetched once.
///
/// # Errors
///
/// - 404 Not Found if the entry does not exist
/// - 400 Bad Request if the entry has no image yet
/// - 500 Internal Server Error if the image cannot be fetched
pub async fn download_entry_handler(
    State(state): State<AppState>,
    session: MaybeSession,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    let Some(Extension(session)) = session else {
        return Err(DrawerError::EntryNotFound(id).into());
    };
    let target = session.drawer.save(id)?;
    let (content_type, bytes) = fetch_image(&state, &target.url).await?;

    let disposition = format!("attachment; filename=\"{}\"", target.filename);
    let disposition = HeaderValue::from_str(&disposition).map_err(|e| {
        AppError::internal("Invalid download filename", json!({ "reason": e.to_string() }))
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(bytes),
    )
        .into_response())
}

async fn fetch_image(state: &AppState, url: &str) -> Result<(HeaderValue, Vec<u8>), AppError> {
    let png = HeaderValue::from_static("image/png");

    if let Some(relative) = url.strip_prefix('/') {
        let relative = FsPath::new(relative);
        let safe = relative.starts_with("img")
            && relative.components().all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(AppError::bad_request(
                "Image path is not downloadable",
                json!({ "url": url }),
            ));
        }

        let path = state.static_dir.join(relative);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            AppError::internal(
                "Failed to read image",
                json!({ "url": url, "reason": e.to_string() }),
            )
        })?;
        return Ok((png, bytes));
    }

    let fetch_error = |e: reqwest::Error| {
        AppError::internal(
            "Failed to fetch image",
            json!({ "url": url, "reason": e.to_string() }),
        )
    };

    let resp = state
        .http
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(fetch_error)?;

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| HeaderValue::from_str(v).ok())
        .unwrap_or(png);

    let bytes = resp.bytes().await.map_err(fetch_error)?;
    Ok((content_type, bytes.to_vec()))
}

/// Opens the full-size viewer on an entry.
///
/// # Endpoint
///
/// `POST /api/drawer/viewer/open` with `{"id": 3}`
///
/// # Errors
///
/// Returns 404 Not Found if the entry does not exist.
pub async fn open_viewer_handler(
    session: MaybeSession,
    Json(payload): Json<OpenViewerRequest>,
) -> Result<Json<ViewerState>, AppError> {
    let Some(Extension(session)) = session else {
        return Err(DrawerError::EntryNotFound(payload.id).into());
    };
    Ok(Json(session.drawer.open_viewer(payload.id)?))
}

/// Moves the viewer to the next entry, wrapping to the first.
///
/// # Endpoint
///
/// `POST /api/drawer/viewer/next`
///
/// # Errors
///
/// Returns 400 Bad Request if the viewer is closed.
pub async fn viewer_next_handler(session: MaybeSession) -> Result<Json<ViewerState>, AppError> {
    let Some(Extension(session)) = session else {
        return Err(DrawerError::ViewerClosed.into());
    };
    Ok(Json(session.drawer.next()?))
}

/// Moves the viewer to the previous entry, wrapping to the last.
///
/// # Endpoint
///
/// `POST /api/drawer/viewer/previous`
///
/// # Errors
///
/// Returns 400 Bad Request if the viewer is closed.
pub async fn viewer_previous_handler(
    session: MaybeSession,
) -> Result<Json<ViewerState>, AppError> {
    let Some(Extension(session)) = session else {
        return Err(DrawerError::ViewerClosed.into());
    };
    Ok(Json(session.drawer.previous()?))
}

/// Closes the viewer.
///
/// # Endpoint
///
/// `DELETE /api/drawer/viewer`
pub async fn close_viewer_handler(session: MaybeSession) -> StatusCode {
    if let Some(Extension(session)) = session {
        session.drawer.close_viewer();
    }
    StatusCode::NO_CONTENT
}
