//! Image generation playground.

use askama::Template;
use axum::{Extension, extract::State, http::HeaderMap, response::Response};

use crate::api::middleware::session::DrawerSession;
use crate::domain::entities::{GeneratedImageRequest, GenerationState, route_content};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::page::Page;

/// One drawer entry as shown on the page.
struct EntryView {
    id: u64,
    prompt: String,
    status: &'static str,
    url: String,
    message: String,
}

impl From<GeneratedImageRequest> for EntryView {
    fn from(entry: GeneratedImageRequest) -> Self {
        let (status, url, message) = match entry.state {
            GenerationState::Pending => ("pending", String::new(), String::new()),
            GenerationState::Completed { url } => ("completed", url, String::new()),
            GenerationState::Failed { message } => ("failed", String::new(), message),
        };

        Self {
            id: entry.id,
            prompt: entry.prompt,
            status,
            url,
            message,
        }
    }
}

#[derive(Template)]
#[template(path = "pages/generate.html")]
struct GenerateTemplate {
    entries: Vec<EntryView>,
    allow_credential_override: bool,
}

/// Renders the drawer page with the caller's current entries.
///
/// The page polls `GET /api/drawer` while entries are pending.
///
/// # Endpoint
///
/// `GET /generate`
pub async fn generate_handler(
    State(state): State<AppState>,
    session: Option<Extension<DrawerSession>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let page = Page::select(&state, &headers, &route_content::GENERATE);

    let children = if page.wants_children() {
        let template = GenerateTemplate {
            entries: session
                .map(|Extension(session)| session.drawer.entries())
                .unwrap_or_default()
                .into_iter()
                .map(EntryView::from)
                .collect(),
            allow_credential_override: state.image_service.settings().allow_credential_override,
        };
        Some(template.render()?)
    } else {
        None
    };

    page.render("Image Gen", children)
}
