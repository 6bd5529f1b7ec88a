//! # tr1p-site
//!
//! A multi-tenant personal site built with Axum: one process serves several
//! hostnames, each mapped to a site with its own layout.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Sites, render decisions, posts, image requests
//! - **Application Layer** ([`application`]) - Host resolution, layout selection,
//!   image generation and the per-session drawer
//! - **Infrastructure Layer** ([`infrastructure`]) - Markdown content on disk and
//!   the OpenAI images client
//! - **API Layer** ([`api`]) - JSON endpoints, DTOs and middleware
//! - **Web Layer** ([`web`]) - Askama pages rendered through the site layout
//!
//! ## Features
//!
//! - Host-based site and layout selection with per-environment host tables
//! - Blog posts and resume rendered from Markdown with YAML front matter
//! - Image generation playground with a test mode that needs no API key
//! - Background drawer of generated images with a wrap-around viewer
//! - Per-IP rate limiting on generation routes
//!
//! ## Quick Start
//!
//! ```bash
//! export SITE_ENV=development
//! export OPENAI_API_KEY="sk-..."   # Optional; test mode works without it
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for the CLI
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        ContentService, DrawerStore, HostResolver, ImageGenerationService, LayoutSelector,
    };
    pub use crate::domain::entities::{
        GeneratedImageRequest, GenerationState, ImageGenerationResult, LayoutKind, Site,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
