//! Core entities of the site.
//!
//! - [`site`] - tenants, environments and the static host table
//! - [`render`] - per-route content declarations and render decisions
//! - [`image`] - drawer entries and generation results
//! - [`post`] - blog posts

pub mod image;
pub mod post;
pub mod render;
pub mod site;

pub use image::{
    GeneratedImageRequest, GenerationState, ImageGenerationResult, SaveTarget, TEST_PROMPT_PREFIX,
};
pub use post::{BlogPost, PostMeta, PostSummary};
pub use render::{RenderDecision, RouteContent, route_content};
pub use site::{
    Environment, LayoutKind, Site, SiteDescriptor, SiteHosts, SlotName, builtin_sites,
};
