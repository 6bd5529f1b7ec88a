//! Provider trait for external image generation.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Request sent to the image provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderImageRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
}

/// One image returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderImage {
    pub url: Option<String>,
    pub revised_prompt: Option<String>,
}

/// Errors raised by an image provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No API key configured")]
    MissingCredential,

    #[error("{0}")]
    Transport(String),

    #[error("Provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Invalid provider configuration: {0}")]
    Configuration(String),
}

/// External image generation backend.
///
/// # Implementations
///
/// - [`crate::infrastructure::openai::OpenAiImageProvider`] - OpenAI Images API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generates images and returns them in provider order.
    ///
    /// `credential` overrides the provider's configured key when present.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on transport failures, non-success statuses,
    /// or a response body that cannot be decoded.
    async fn generate(
        &self,
        request: ProviderImageRequest,
        credential: Option<String>,
    ) -> Result<Vec<ProviderImage>, ProviderError>;

    /// Whether a default credential is configured.
    fn has_credential(&self) -> bool;
}
