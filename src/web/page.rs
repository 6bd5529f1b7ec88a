//! Layout selection and page assembly shared by the page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::domain::entities::{LayoutKind, RenderDecision, RouteContent, Site, SlotName};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_host::extract_host_from_headers;

/// The tr1p.io shell: gradient background, navbar and footer.
#[derive(Template, WebTemplate)]
#[template(path = "layouts/tr1p.html")]
struct Tr1pLayoutTemplate {
    title: String,
    site: Site,
    slot: &'static str,
    active: &'static str,
    body: String,
}

/// A page being assembled for one request.
///
/// Handlers follow the same three steps:
///
/// 1. [`Page::select`] picks the layout and slot for the request's host
/// 2. if [`Page::wants_slot`], render the site content and pass it to
///    [`Page::with_slot`]; empty content falls back to the children
/// 3. if [`Page::wants_children`], render the generic children, then
///    [`Page::render`]
pub struct Page {
    route: &'static str,
    decision: RenderDecision,
    slot_html: Option<String>,
}

impl Page {
    pub fn select(state: &AppState, headers: &HeaderMap, route: &RouteContent) -> Self {
        let host = extract_host_from_headers(headers);
        let decision = state.layout_selector.select_for_host(host.as_deref(), route);

        tracing::debug!(
            route = route.name,
            site = %decision.site,
            render_children = decision.render_children,
            "Layout selected"
        );

        Self {
            route: route.name,
            decision,
            slot_html: None,
        }
    }

    pub fn decision(&self) -> RenderDecision {
        self.decision
    }

    pub fn wants_slot(&self) -> bool {
        self.decision.slot.is_some()
    }

    pub fn with_slot(self, html: Option<String>) -> Self {
        let decision = self.decision.with_rendered_slot(html.as_deref());
        let slot_html = if decision.slot.is_some() { html } else { None };

        Self {
            decision,
            slot_html,
            ..self
        }
    }

    pub fn wants_children(&self) -> bool {
        self.decision.render_children
    }

    /// Wraps the slot content, or else `children`, in the selected layout.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if neither produced any content.
    pub fn render(self, title: &str, children: Option<String>) -> Result<Response, AppError> {
        let body = self
            .slot_html
            .or(children)
            .filter(|html| !html.trim().is_empty())
            .ok_or_else(|| {
                tracing::warn!(route = self.route, "Neither slot nor children produced content");
                AppError::not_found("Page not found", json!({ "route": self.route }))
            })?;

        let slot = match self.decision.slot {
            Some(SlotName::Tr1pIo) => "tr1p_io",
            None => "children",
        };

        let response = match self.decision.layout {
            LayoutKind::Tr1p => Tr1pLayoutTemplate {
                title: title.to_string(),
                site: self.decision.site,
                slot,
                active: self.route,
                body,
            }
            .into_response(),
        };

        Ok(response)
    }
}
