//! Image generation entities.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Prefix added to prompts submitted in test mode.
pub const TEST_PROMPT_PREFIX: &str = "TEST: ";

/// Normalized outcome of one generation attempt.
///
/// `url` is empty whenever `success` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageGenerationResult {
    pub success: bool,
    pub message: String,
    pub url: String,
}

impl ImageGenerationResult {
    pub fn success(url: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Image generated successfully.".to_string(),
            url: url.into(),
        }
    }

    pub fn failure(reason: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            message: format!("Failed to generate image. {}", reason),
            url: String::new(),
        }
    }
}

/// Lifecycle of a drawer entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationState {
    Pending,
    Completed { url: String },
    Failed { message: String },
}

impl GenerationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, GenerationState::Pending)
    }
}

impl From<ImageGenerationResult> for GenerationState {
    fn from(result: ImageGenerationResult) -> Self {
        if result.success {
            GenerationState::Completed { url: result.url }
        } else {
            GenerationState::Failed {
                message: result.message,
            }
        }
    }
}

/// One prompt submitted through the drawer.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedImageRequest {
    pub id: u64,
    /// Prompt as displayed; test submissions carry [`TEST_PROMPT_PREFIX`].
    pub prompt: String,
    #[serde(skip)]
    pub credential_override: Option<String>,
    pub test_mode: bool,
    #[serde(flatten)]
    pub state: GenerationState,
    pub submitted_at: DateTime<Utc>,
}

impl GeneratedImageRequest {
    /// Creates a pending entry. Test submissions get the display prefix.
    pub fn pending(
        id: u64,
        prompt: &str,
        credential_override: Option<String>,
        test_mode: bool,
    ) -> Self {
        let prompt = if test_mode {
            format!("{}{}", TEST_PROMPT_PREFIX, prompt)
        } else {
            prompt.to_string()
        };

        Self {
            id,
            prompt,
            credential_override,
            test_mode,
            state: GenerationState::Pending,
            submitted_at: Utc::now(),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match &self.state {
            GenerationState::Completed { url } => Some(url),
            _ => None,
        }
    }
}

/// Where and under what name a completed image is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveTarget {
    pub url: String,
    pub filename: String,
}

impl SaveTarget {
    pub fn new(url: &str, at: DateTime<Utc>) -> Self {
        Self {
            url: url.to_string(),
            filename: format!(
                "GeneratedImage-{}.png",
                at.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_failure_result_has_prefix_and_empty_url() {
        let result = ImageGenerationResult::failure("boom");
        assert!(!result.success);
        assert_eq!(result.message, "Failed to generate image. boom");
        assert!(result.url.is_empty());
    }

    #[test]
    fn test_state_from_result() {
        let state: GenerationState = ImageGenerationResult::success("/img/a.png").into();
        assert_eq!(
            state,
            GenerationState::Completed {
                url: "/img/a.png".to_string()
            }
        );

        let state: GenerationState = ImageGenerationResult::failure("nope").into();
        assert!(matches!(state, GenerationState::Failed { .. }));
    }

    #[test]
    fn test_pending_prefixes_test_prompts() {
        let entry = GeneratedImageRequest::pending(1, "a cat astronaut", None, true);
        assert_eq!(entry.prompt, "TEST: a cat astronaut");
        assert!(entry.state.is_pending());
        assert!(entry.url().is_none());

        let entry = GeneratedImageRequest::pending(2, "a cat astronaut", None, false);
        assert_eq!(entry.prompt, "a cat astronaut");
    }

    #[test]
    fn test_entry_serialization_hides_credential() {
        let entry =
            GeneratedImageRequest::pending(7, "x", Some("sk-secret".to_string()), false);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["status"], "pending");
        assert!(json.get("credential_override").is_none());
    }

    #[test]
    fn test_save_target_filename() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        let target = SaveTarget::new("/img/test/woods.png", at);

        assert_eq!(target.url, "/img/test/woods.png");
        assert_eq!(target.filename, "GeneratedImage-2024-03-09T14:05:00.000Z.png");
    }
}
