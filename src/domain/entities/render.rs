//! Per-request render decisions.

use super::site::{LayoutKind, Site, SlotName};
use serde::Serialize;

/// Declares which sites provide site-specific content for a route.
///
/// Routes absent from `sites` render only their generic children.
#[derive(Debug, Clone, Copy)]
pub struct RouteContent {
    pub name: &'static str,
    pub sites: &'static [Site],
}

impl RouteContent {
    pub const fn new(name: &'static str, sites: &'static [Site]) -> Self {
        Self { name, sites }
    }

    pub fn provides(&self, site: Site) -> bool {
        self.sites.contains(&site)
    }
}

/// Route declarations for every page the site serves.
pub mod route_content {
    use super::{RouteContent, Site};

    pub const HOME: RouteContent = RouteContent::new("home", &[Site::Primary]);
    pub const POSTS: RouteContent = RouteContent::new("posts", &[Site::Primary]);
    pub const POST: RouteContent = RouteContent::new("post", &[Site::Primary]);
    pub const RESUME: RouteContent = RouteContent::new("resume", &[Site::Primary]);
    pub const GENERATE: RouteContent = RouteContent::new("generate", &[]);
}

/// The resolved rendering choice for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderDecision {
    /// Site whose layout and slot are used, after any fallback.
    pub site: Site,
    pub layout: LayoutKind,
    /// Slot to fill, or `None` when the route has no site-specific content.
    pub slot: Option<SlotName>,
    pub render_children: bool,
}

impl RenderDecision {
    /// Adjusts the decision once the slot content has been rendered.
    ///
    /// An empty slot falls back to the generic children instead of leaving
    /// the page blank.
    pub fn with_rendered_slot(self, slot_html: Option<&str>) -> Self {
        let slot_empty = slot_html.is_none_or(|html| html.trim().is_empty());

        if self.slot.is_some() && slot_empty {
            tracing::warn!(
                site = %self.site,
                "Slot content is empty, rendering generic children instead"
            );
            return Self {
                slot: None,
                render_children: true,
                ..self
            };
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(slot: Option<SlotName>, render_children: bool) -> RenderDecision {
        RenderDecision {
            site: Site::Primary,
            layout: LayoutKind::Tr1p,
            slot,
            render_children,
        }
    }

    #[test]
    fn test_route_content_provides() {
        assert!(route_content::HOME.provides(Site::Primary));
        assert!(!route_content::HOME.provides(Site::GameRaven));
        assert!(!route_content::GENERATE.provides(Site::Primary));
    }

    #[test]
    fn test_with_rendered_slot_keeps_non_empty_slot() {
        let d = decision(Some(SlotName::Tr1pIo), false).with_rendered_slot(Some("<h1>hi</h1>"));
        assert_eq!(d.slot, Some(SlotName::Tr1pIo));
        assert!(!d.render_children);
    }

    #[test]
    fn test_with_rendered_slot_falls_back_on_empty_slot() {
        let d = decision(Some(SlotName::Tr1pIo), false).with_rendered_slot(Some("   \n"));
        assert!(d.slot.is_none());
        assert!(d.render_children);

        let d = decision(Some(SlotName::Tr1pIo), false).with_rendered_slot(None);
        assert!(d.render_children);
    }

    #[test]
    fn test_with_rendered_slot_leaves_children_only_decision_alone() {
        let d = decision(None, true).with_rendered_slot(None);
        assert_eq!(d, decision(None, true));
    }
}
