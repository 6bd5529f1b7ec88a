//! Home page handler.

use askama::Template;
use axum::{extract::State, http::HeaderMap, response::Response};

use crate::domain::entities::route_content;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::page::Page;

/// The tr1p.io welcome card.
#[derive(Template)]
#[template(path = "pages/home.html")]
struct HomeTemplate {
    roles: &'static [&'static str],
}

/// Generic landing page for sites without their own home content.
#[derive(Template)]
#[template(path = "pages/landing.html")]
struct LandingTemplate {}

const ROLES: &[&str] = &["software engineer", "developer", "full stack developer", "nerd"];

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let page = Page::select(&state, &headers, &route_content::HOME);

    let page = if page.wants_slot() {
        let html = HomeTemplate { roles: ROLES }.render()?;
        page.with_slot(Some(html))
    } else {
        page
    };

    let children = if page.wants_children() {
        Some(LandingTemplate {}.render()?)
    } else {
        None
    };

    page.render("tr1p.io", children)
}
