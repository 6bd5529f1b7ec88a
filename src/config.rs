//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Example
//!
//! ```bash
//! export SITE_ENV="prod"
//! export OPENAI_API_KEY="sk-..."
//! export CONTENT_DIR="/srv/tr1p/markdown"
//! ```
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SITE_ENV` - Host table environment: `local`, `dev` or `prod` (default: `local`)
//! - `BEHIND_PROXY` - Read client IPs from forwarding headers (default: `false`)
//! - `OPENAI_API_KEY` - Provider credential (optional; live generation fails without it
//!   unless the request carries its own key)
//! - `OPENAI_BASE_URL` - Provider API root (default: `https://api.openai.com`)
//! - `IMAGE_MODEL` / `IMAGE_SIZE` - Generation parameters (default: `dall-e-3`, `1792x1024`)
//! - `PROVIDER_TIMEOUT_SECONDS` - HTTP timeout for provider calls (default: 60)
//! - `TEST_IMAGE_DELAY_MS` - Delay before a test image is returned (default: 50)
//! - `ALLOW_CREDENTIAL_OVERRIDE` - Accept per-request API keys (default: `true`)
//! - `DRAWER_CANCEL_ON_DISMISS` - Abort pending generations on dismiss (default: `false`)
//! - `DRAWER_SESSION_TTL_SECONDS` - Idle drawer session lifetime (default: 3600)
//! - `CONTENT_DIR` - Markdown posts and resume (default: `markdown`)
//! - `STATIC_DIR` - Static assets served under `/static` and `/img` (default: `static`)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::entities::Environment;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Environment whose hostnames are linked to in generated pages.
    /// All environments' hostnames resolve regardless.
    pub site_env: Environment,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,

    // ── Image provider ──────────────────────────────────────────────────────
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub image_model: String,
    pub image_size: String,
    pub provider_timeout_seconds: u64,
    pub test_image_delay_ms: u64,
    pub allow_credential_override: bool,

    // ── Drawer ──────────────────────────────────────────────────────────────
    pub drawer_cancel_on_dismiss: bool,
    pub drawer_session_ttl_seconds: u64,

    // ── Content ─────────────────────────────────────────────────────────────
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            site_env: Environment::Local,
            behind_proxy: false,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com".to_string(),
            image_model: "dall-e-3".to_string(),
            image_size: "1792x1024".to_string(),
            provider_timeout_seconds: 60,
            test_image_delay_ms: 50,
            allow_credential_override: true,
            drawer_cancel_on_dismiss: false,
            drawer_session_ttl_seconds: 3600,
            content_dir: PathBuf::from("markdown"),
            static_dir: PathBuf::from("static"),
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_number(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unparseable numbers fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `SITE_ENV` names an unknown environment.
    pub fn from_env() -> Result<Self> {
        let site_env = match env::var("SITE_ENV") {
            Ok(value) => value
                .parse::<Environment>()
                .map_err(anyhow::Error::msg)
                .context("Invalid SITE_ENV")?,
            Err(_) => Environment::Local,
        };

        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            listen_addr: env_string("LISTEN", "0.0.0.0:3000"),
            log_level: env_string("RUST_LOG", "info"),
            log_format: env_string("LOG_FORMAT", "text"),
            site_env,
            behind_proxy: env_flag("BEHIND_PROXY", false),
            openai_api_key,
            openai_base_url: env_string("OPENAI_BASE_URL", "https://api.openai.com"),
            image_model: env_string("IMAGE_MODEL", "dall-e-3"),
            image_size: env_string("IMAGE_SIZE", "1792x1024"),
            provider_timeout_seconds: env_number("PROVIDER_TIMEOUT_SECONDS", 60),
            test_image_delay_ms: env_number("TEST_IMAGE_DELAY_MS", 50),
            allow_credential_override: env_flag("ALLOW_CREDENTIAL_OVERRIDE", true),
            drawer_cancel_on_dismiss: env_flag("DRAWER_CANCEL_ON_DISMISS", false),
            drawer_session_ttl_seconds: env_number("DRAWER_SESSION_TTL_SECONDS", 3600),
            content_dir: PathBuf::from(env_string("CONTENT_DIR", "markdown")),
            static_dir: PathBuf::from(env_string("STATIC_DIR", "static")),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `openai_base_url` is not an http(s) URL
    /// - `image_size` is not `<width>x<height>`
    /// - a timeout or TTL is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let base = url::Url::parse(&self.openai_base_url)
            .with_context(|| format!("OPENAI_BASE_URL is not a URL: '{}'", self.openai_base_url))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!(
                "OPENAI_BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.openai_base_url
            );
        }

        if self.image_model.trim().is_empty() {
            anyhow::bail!("IMAGE_MODEL must not be empty");
        }

        let valid_size = self
            .image_size
            .split_once('x')
            .is_some_and(|(w, h)| w.parse::<u32>().is_ok() && h.parse::<u32>().is_ok());
        if !valid_size {
            anyhow::bail!(
                "IMAGE_SIZE must look like '1024x1024', got '{}'",
                self.image_size
            );
        }

        if self.provider_timeout_seconds == 0 {
            anyhow::bail!("PROVIDER_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.drawer_session_ttl_seconds == 0 {
            anyhow::bail!("DRAWER_SESSION_TTL_SECONDS must be greater than 0");
        }

        Ok(())
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_seconds)
    }

    pub fn test_image_delay(&self) -> Duration {
        Duration::from_millis(self.test_image_delay_ms)
    }

    pub fn drawer_session_ttl(&self) -> Duration {
        Duration::from_secs(self.drawer_session_ttl_seconds)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Site environment: {}", self.site_env);

        match self.openai_api_key {
            Some(ref key) => tracing::info!("  OpenAI API key: {}", mask_secret(key)),
            None => tracing::warn!("  OpenAI API key: not set (live generation needs a per-request key)"),
        }

        tracing::info!("  OpenAI base URL: {}", self.openai_base_url);
        tracing::info!("  Image model: {} ({})", self.image_model, self.image_size);
        tracing::info!("  Credential override: {}", self.allow_credential_override);
        tracing::info!("  Drawer session TTL: {}s", self.drawer_session_ttl_seconds);
        tracing::info!("  Content dir: {}", self.content_dir.display());
        tracing::info!("  Static dir: {}", self.static_dir.display());
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks a secret for logging, keeping a short prefix and suffix.
///
/// - `sk-abcdefghijklmnop` → `sk-a***mnop`
/// - anything of 12 characters or fewer → `***`
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 12 {
        return "***".to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
