//! Shared application state injected into handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::{
    ContentService, DrawerStore, ImageGenerationService, LayoutSelector,
};

/// Services and settings shared by all handlers.
///
/// Cloned per request; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub layout_selector: Arc<LayoutSelector>,
    pub image_service: Arc<ImageGenerationService>,
    pub drawers: Arc<DrawerStore>,
    pub content_service: Arc<ContentService>,
    /// Client used to fetch remote images for download.
    pub http: reqwest::Client,
    /// Root of locally served assets; `/img/...` maps to `<static_dir>/img/...`.
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(
        layout_selector: Arc<LayoutSelector>,
        image_service: Arc<ImageGenerationService>,
        drawers: Arc<DrawerStore>,
        content_service: Arc<ContentService>,
        http: reqwest::Client,
        static_dir: PathBuf,
    ) -> Self {
        Self {
            layout_selector,
            image_service,
            drawers,
            content_service,
            http,
            static_dir: Arc::new(static_dir),
        }
    }
}
