//! DTOs for image generation and the drawer.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::application::services::ViewerState;
use crate::domain::entities::GeneratedImageRequest;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Prompt must not be blank".into()));
    }
    Ok(())
}

/// A prompt to generate, used by both the stateless action and the drawer.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateImageRequest {
    #[validate(length(min = 1, max = 4000, message = "Prompt must be 1-4000 characters"))]
    #[validate(custom(function = "not_blank"))]
    pub prompt: String,

    /// Per-request API key, used only when overrides are enabled.
    #[validate(length(max = 512))]
    pub credential: Option<String>,

    /// Return a sample image without calling the provider.
    #[serde(default)]
    pub test: bool,
}

/// Request to open the viewer on an entry.
#[derive(Debug, Deserialize)]
pub struct OpenViewerRequest {
    pub id: u64,
}

/// The caller's drawer.
#[derive(Debug, Serialize)]
pub struct DrawerResponse {
    pub entries: Vec<GeneratedImageRequest>,
    pub viewer: Option<ViewerState>,
    pub pending: usize,
}
