//! OpenAI Images API implementation of the image provider.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::domain::repositories::{
    ImageProvider, ProviderError, ProviderImage, ProviderImageRequest,
};

const GENERATIONS_PATH: &str = "v1/images/generations";

#[derive(Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Deserialize)]
struct GeneratedImage {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    revised_prompt: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// [`ImageProvider`] backed by the OpenAI Images API.
///
/// Sends `POST {base}/v1/images/generations` with bearer auth. A single
/// attempt is made per call; the only timeout is the HTTP client's.
pub struct OpenAiImageProvider {
    http: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl OpenAiImageProvider {
    /// Builds a provider with its own HTTP client.
    ///
    /// # Arguments
    ///
    /// - `base_url` - API root, e.g. `"https://api.openai.com"`
    /// - `api_key` - default credential; `None` means every call needs an override
    /// - `timeout` - total request timeout
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Configuration`] if the URL is invalid or the
    /// client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Configuration(format!("HTTP client: {}", e)))?;

        Self::from_reqwest(base_url, http, api_key)
    }

    /// Wraps an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        let endpoint = Self::endpoint(base_url)?;
        let api_key = api_key.filter(|key| !key.trim().is_empty());

        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }

    fn endpoint(base_url: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(base_url)
            .map_err(|e| ProviderError::Configuration(format!("{}: {}", base_url, e)))?;

        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{}/{}", path, GENERATIONS_PATH));

        Ok(url)
    }

    async fn error_message(resp: reqwest::Response) -> String {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    body
                }
            })
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    async fn generate(
        &self,
        request: ProviderImageRequest,
        credential: Option<String>,
    ) -> Result<Vec<ProviderImage>, ProviderError> {
        let key = credential
            .or_else(|| self.api_key.clone())
            .ok_or(ProviderError::MissingCredential)?;

        debug!(
            "POST {} model={} size={}",
            self.endpoint, request.model, request.size
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = Self::error_message(resp).await;
            warn!("Image provider returned {}: {}", status, message);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerationResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        Ok(body
            .data
            .into_iter()
            .map(|image| ProviderImage {
                url: image.url,
                revised_prompt: image.revised_prompt,
            })
            .collect())
    }

    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_path() {
        let cases = [
            ("https://api.openai.com", "https://api.openai.com/v1/images/generations"),
            ("https://api.openai.com/", "https://api.openai.com/v1/images/generations"),
            ("http://proxy.local/openai/", "http://proxy.local/openai/v1/images/generations"),
        ];

        for (base, expected) in cases {
            assert_eq!(OpenAiImageProvider::endpoint(base).unwrap().as_str(), expected);
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let result = OpenAiImageProvider::endpoint("not a url");
        assert!(matches!(result, Err(ProviderError::Configuration(_))));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let provider = OpenAiImageProvider::from_reqwest(
            "https://api.openai.com",
            reqwest::Client::new(),
            Some("  ".to_string()),
        )
        .unwrap();

        assert!(!provider.has_credential());
    }

    #[tokio::test]
    async fn test_missing_credential_skips_request() {
        // Unroutable port: a request attempt would surface as Transport.
        let provider = OpenAiImageProvider::from_reqwest(
            "http://127.0.0.1:9",
            reqwest::Client::new(),
            None,
        )
        .unwrap();

        let request = ProviderImageRequest {
            model: "dall-e-3".to_string(),
            prompt: "x".to_string(),
            n: 1,
            size: "1792x1024".to_string(),
        };

        let result = provider.generate(request, None).await;
        assert!(matches!(result, Err(ProviderError::MissingCredential)));
    }
}
