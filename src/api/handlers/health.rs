//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Components Reported
///
/// 1. **Provider**: `live` when an API key is configured, `test_only` otherwise
/// 2. **Drawer sessions**: number of in-memory sessions
///
/// A missing API key does not make the service unhealthy: test mode and
/// per-request keys still work.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "provider": { "status": "live", "message": "dall-e-3 1792x1024" },
///     "drawer_sessions": { "status": "ok", "message": "3" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let settings = state.image_service.settings();

    let provider = CheckStatus {
        status: if state.image_service.live_ready() {
            "live"
        } else {
            "test_only"
        }
        .to_string(),
        message: Some(format!("{} {}", settings.model, settings.size)),
    };

    let drawer_sessions = CheckStatus {
        status: "ok".to_string(),
        message: Some(state.drawers.len().to_string()),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            provider,
            drawer_sessions,
        },
    })
}
