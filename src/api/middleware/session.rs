//! Drawer session middleware.

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::application::services::Drawer;
use crate::state::AppState;

/// Name of the cookie carrying the drawer session id.
pub const SESSION_COOKIE: &str = "drawer_session";

/// The caller's drawer, inserted into request extensions by [`layer`].
#[derive(Clone)]
pub struct DrawerSession {
    pub id: String,
    pub drawer: Arc<Drawer>,
}

/// Reads the session id from the `Cookie` header, if present.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|cookie_header| cookie_header.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(SESSION_COOKIE), Some(value)) => Some(value.to_string()),
                _ => None,
            }
        })
}

/// Attaches the caller's drawer, creating a session if needed.
///
/// Only for routes that add to the drawer; read-only routes use
/// [`lookup_layer`] so cookie-less clients never allocate a session.
///
/// # Session Flow
///
/// 1. Read the `drawer_session` cookie
/// 2. Look up the drawer in [`crate::application::services::DrawerStore`]
/// 3. Missing, malformed or expired ids get a fresh session
/// 4. Insert [`DrawerSession`] into request extensions
/// 5. Set the cookie on the response when a session was created
///
/// The cookie is `HttpOnly`, `SameSite=Lax` and has no `Max-Age`; idle
/// sessions expire server-side.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let cookie = session_cookie(req.headers());
    let (id, drawer, created) = st.drawers.get_or_create(cookie.as_deref());

    req.extensions_mut().insert(DrawerSession {
        id: id.clone(),
        drawer,
    });

    let mut response = next.run(req).await;

    if created {
        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Invalid session cookie value: {}", e),
        }
    }

    response
}

/// Attaches the caller's drawer only if the session already exists.
///
/// Handlers behind this layer extract `Option<Extension<DrawerSession>>`
/// and treat `None` as an empty drawer.
pub async fn lookup_layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let existing = session_cookie(req.headers())
        .and_then(|id| st.drawers.get(&id).map(|drawer| DrawerSession { id, drawer }));

    if let Some(session) = existing {
        req.extensions_mut().insert(session);
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; drawer_session=abc123; lang=en"),
        );

        assert_eq!(session_cookie(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_cookie_missing() {
        let mut headers = HeaderMap::new();
        assert!(session_cookie(&headers).is_none());

        headers.insert(COOKIE, HeaderValue::from_static("drawer_sessionx=1"));
        assert!(session_cookie(&headers).is_none());
    }
}
