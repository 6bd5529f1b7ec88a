//! Resume page handler.

use askama::Template;
use axum::{extract::State, http::HeaderMap, response::Response};

use crate::domain::entities::route_content;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::page::Page;

#[derive(Template)]
#[template(path = "pages/resume.html")]
struct ResumeTemplate {
    content_html: String,
}

/// Renders the resume from markdown.
///
/// # Endpoint
///
/// `GET /resume`
pub async fn resume_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let page = Page::select(&state, &headers, &route_content::RESUME);

    let page = if page.wants_slot() {
        let content_html = state.content_service.resume_html().await?;
        let html = ResumeTemplate { content_html }.render()?;
        page.with_slot(Some(html))
    } else {
        page
    };

    page.render("Resume", None)
}
