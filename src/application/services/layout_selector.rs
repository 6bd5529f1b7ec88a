//! Layout and slot selection per site and route.

use std::sync::Arc;

use crate::application::services::HostResolver;
use crate::domain::entities::{RenderDecision, RouteContent, Site};

/// Chooses the page shell and slot for a resolved site.
///
/// Sites without a layout of their own (and [`Site::Unknown`]) render as
/// the resolver's default site.
pub struct LayoutSelector {
    resolver: Arc<HostResolver>,
}

impl LayoutSelector {
    pub fn new(resolver: Arc<HostResolver>) -> Self {
        Self { resolver }
    }

    /// Selects the layout, slot and children flag for one request.
    ///
    /// Generic children render exactly when the route declares no
    /// site-specific content for the effective site.
    pub fn select(&self, site: Site, route: &RouteContent) -> RenderDecision {
        let registered = self
            .resolver
            .descriptor(site)
            .and_then(|d| d.layout.map(|layout| (d.site, layout, d.slot)));

        let (site, layout, slot) = match registered {
            Some(selected) => selected,
            None => {
                let default = self.resolver.default_descriptor();
                if site != Site::Unknown {
                    tracing::warn!("Site {} has no layout. Rendering with {}", site, default.site);
                }
                (default.site, self.resolver.default_layout(), default.slot)
            }
        };

        let has_content = route.provides(site);

        RenderDecision {
            site,
            layout,
            slot: if has_content { slot } else { None },
            render_children: !has_content,
        }
    }

    /// Resolves the host and selects in one step.
    pub fn select_for_host(&self, host: Option<&str>, route: &RouteContent) -> RenderDecision {
        let site = self.resolver.resolve_optional(host);
        self.select(site, route)
    }

    pub fn resolver(&self) -> &HostResolver {
        &self.resolver
    }
}
