//! Image generation with a live provider or canned test images.

use rand::seq::IndexedRandom;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::ImageGenerationResult;
use crate::domain::repositories::{ImageProvider, ProviderImageRequest};

/// Sample images served in test mode.
pub const SAMPLE_IMAGES: &[&str] = &[
    "/img/test/woods.png",
    "/img/test/stargaze.png",
    "/img/test/pondering.png",
    "/img/test/neoncity.png",
    "/img/test/dog-and-cat.png",
    "/img/test/cyber-cabin-woods.png",
    "/img/test/arrow-of-time.png",
    "/img/test/arrow.png",
];

/// Settings for live and test generations.
#[derive(Debug, Clone)]
pub struct ImageSettings {
    pub model: String,
    pub size: String,
    /// Delay before a test image is returned.
    pub test_delay: Duration,
    /// Whether a per-request credential may replace the configured key.
    pub allow_credential_override: bool,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            model: "dall-e-3".to_string(),
            size: "1792x1024".to_string(),
            test_delay: Duration::from_millis(50),
            allow_credential_override: true,
        }
    }
}

/// Service turning prompts into image URLs.
///
/// [`Self::generate`] never fails: every provider error is folded into an
/// unsuccessful [`ImageGenerationResult`]. There are no retries and no
/// caching of repeated prompts.
pub struct ImageGenerationService {
    provider: Arc<dyn ImageProvider>,
    settings: ImageSettings,
}

impl ImageGenerationService {
    pub fn new(provider: Arc<dyn ImageProvider>, settings: ImageSettings) -> Self {
        Self { provider, settings }
    }

    /// Generates one image for `prompt`.
    ///
    /// # Modes
    ///
    /// - **Live**: one provider call for a single image at the configured
    ///   size; the first returned URL is used.
    /// - **Test** (`test_mode`): the provider is never called; after
    ///   [`ImageSettings::test_delay`] a random [`SAMPLE_IMAGES`] URL is returned.
    ///
    /// `credential_override` replaces the configured key for this call when
    /// overrides are allowed and the value is non-blank.
    pub async fn generate(
        &self,
        prompt: &str,
        test_mode: bool,
        credential_override: Option<&str>,
    ) -> ImageGenerationResult {
        let result = if test_mode {
            self.generate_test_image().await
        } else {
            self.generate_live(prompt, credential_override).await
        };

        if result.success {
            tracing::info!(test_mode, url = %result.url, "Image generated");
        } else {
            tracing::warn!(test_mode, message = %result.message, "Image generation failed");
        }

        result
    }

    async fn generate_live(
        &self,
        prompt: &str,
        credential_override: Option<&str>,
    ) -> ImageGenerationResult {
        let credential = match credential_override.map(str::trim).filter(|c| !c.is_empty()) {
            Some(_) if !self.settings.allow_credential_override => {
                tracing::debug!("Ignoring credential override (disabled)");
                None
            }
            other => other.map(str::to_string),
        };

        let request = ProviderImageRequest {
            model: self.settings.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: self.settings.size.clone(),
        };

        match self.provider.generate(request, credential).await {
            Ok(images) => match images.into_iter().next().and_then(|image| image.url) {
                Some(url) if !url.is_empty() => ImageGenerationResult::success(url),
                _ => ImageGenerationResult::failure("Provider returned no image URL"),
            },
            Err(e) => ImageGenerationResult::failure(e),
        }
    }

    async fn generate_test_image(&self) -> ImageGenerationResult {
        tokio::time::sleep(self.settings.test_delay).await;

        let url = SAMPLE_IMAGES
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(SAMPLE_IMAGES[0]);

        ImageGenerationResult::success(url)
    }

    pub fn settings(&self) -> &ImageSettings {
        &self.settings
    }

    /// Whether the live path has a configured credential.
    pub fn live_ready(&self) -> bool {
        self.provider.has_credential()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockImageProvider, ProviderError, ProviderImage};

    fn settings() -> ImageSettings {
        ImageSettings {
            test_delay: Duration::from_millis(5),
            ..ImageSettings::default()
        }
    }

    fn image(url: &str) -> ProviderImage {
        ProviderImage {
            url: Some(url.to_string()),
            revised_prompt: None,
        }
    }

    #[tokio::test]
    async fn test_test_mode_returns_sample_and_skips_provider() {
        // No expectations: any provider call panics.
        let provider = MockImageProvider::new();
        let service = ImageGenerationService::new(Arc::new(provider), settings());

        for _ in 0..20 {
            let result = service.generate("a cat astronaut", true, None).await;
            assert!(result.success);
            assert_eq!(result.message, "Image generated successfully.");
            assert!(SAMPLE_IMAGES.contains(&result.url.as_str()));
        }
    }

    #[tokio::test]
    async fn test_live_success_uses_first_url() {
        let mut provider = MockImageProvider::new();
        provider
            .expect_generate()
            .withf(|req, cred| {
                req.model == "dall-e-3"
                    && req.prompt == "a cat astronaut"
                    && req.n == 1
                    && req.size == "1792x1024"
                    && cred.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(vec![image("https://img/1.png"), image("https://img/2.png")]));

        let service = ImageGenerationService::new(Arc::new(provider), settings());
        let result = service.generate("a cat astronaut", false, None).await;

        assert!(result.success);
        assert_eq!(result.url, "https://img/1.png");
    }

    #[tokio::test]
    async fn test_live_provider_error_becomes_failure() {
        let mut provider = MockImageProvider::new();
        provider.expect_generate().times(1).returning(|_, _| {
            Err(ProviderError::Api {
                status: 400,
                message: "content policy violation".to_string(),
            })
        });

        let service = ImageGenerationService::new(Arc::new(provider), settings());
        let result = service.generate("bad", false, None).await;

        assert!(!result.success);
        assert!(result.url.is_empty());
        assert!(result.message.starts_with("Failed to generate image. "));
        assert!(result.message.contains("content policy violation"));
    }

    #[tokio::test]
    async fn test_live_empty_response_becomes_failure() {
        let mut provider = MockImageProvider::new();
        provider
            .expect_generate()
            .times(1)
            .returning(|_, _| Ok(vec![ProviderImage::default()]));

        let service = ImageGenerationService::new(Arc::new(provider), settings());
        let result = service.generate("x", false, None).await;

        assert!(!result.success);
        assert!(result.url.is_empty());
        assert!(!result.message.is_empty());
    }

    #[tokio::test]
    async fn test_credential_override_is_forwarded() {
        let mut provider = MockImageProvider::new();
        provider
            .expect_generate()
            .withf(|_, cred| cred.as_deref() == Some("sk-user"))
            .times(1)
            .returning(|_, _| Ok(vec![image("https://img/u.png")]));

        let service = ImageGenerationService::new(Arc::new(provider), settings());
        let result = service.generate("x", false, Some("  sk-user ")).await;

        assert!(result.success);
    }

    #[tokio::test]
    async fn test_blank_or_disallowed_override_is_dropped() {
        let mut provider = MockImageProvider::new();
        provider
            .expect_generate()
            .withf(|_, cred| cred.is_none())
            .times(2)
            .returning(|_, _| Ok(vec![image("https://img/e.png")]));
        let provider = Arc::new(provider);

        let service = ImageGenerationService::new(provider.clone(), settings());
        assert!(service.generate("x", false, Some("   ")).await.success);

        let locked = ImageGenerationService::new(
            provider,
            ImageSettings {
                allow_credential_override: false,
                ..settings()
            },
        );
        assert!(locked.generate("x", false, Some("sk-user")).await.success);
    }

    #[tokio::test]
    async fn test_missing_credential_becomes_failure() {
        let mut provider = MockImageProvider::new();
        provider
            .expect_generate()
            .returning(|_, _| Err(ProviderError::MissingCredential));

        let service = ImageGenerationService::new(Arc::new(provider), settings());
        let result = service.generate("x", false, None).await;

        assert!(!result.success);
        assert_eq!(result.message, "Failed to generate image. No API key configured");
    }
}
