//! Application layer services implementing business logic.
//!
//! Services consume the repository and provider traits from the domain layer
//! and expose a small API to the HTTP handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::host_resolver::HostResolver`] - Host to site mapping
//! - [`services::layout_selector::LayoutSelector`] - Layout and slot selection
//! - [`services::image_service::ImageGenerationService`] - Live and test image generation
//! - [`services::drawer_service::Drawer`] - Per-session request list and viewer
//! - [`services::drawer_store::DrawerStore`] - Drawer sessions
//! - [`services::content_service::ContentService`] - Blog posts and resume

pub mod services;
