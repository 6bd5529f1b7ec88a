//! Handler for the stateless image generation action.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::images::GenerateImageRequest;
use crate::domain::entities::ImageGenerationResult;
use crate::error::AppError;
use crate::state::AppState;

/// Generates one image and waits for the result.
///
/// # Endpoint
///
/// `POST /api/images/generate`
///
/// # Request Body
///
/// ```json
/// {
///   "prompt": "a cat astronaut",
///   "credential": "sk-...",  // optional
///   "test": false            // optional
/// }
/// ```
///
/// # Response
///
/// Always `200 OK` once the prompt is valid; provider failures are reported
/// in the body:
///
/// ```json
/// {
///   "success": false,
///   "message": "Failed to generate image. No API key configured",
///   "url": ""
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
pub async fn generate_image_handler(
    State(state): State<AppState>,
    Json(payload): Json<GenerateImageRequest>,
) -> Result<Json<ImageGenerationResult>, AppError> {
    payload.validate()?;

    let result = state
        .image_service
        .generate(&payload.prompt, payload.test, payload.credential.as_deref())
        .await;

    Ok(Json(result))
}
