//! Infrastructure layer for external integrations.
//!
//! Implements the provider and repository traits defined by the domain
//! layer.
//!
//! # Modules
//!
//! - [`openai`] - OpenAI Images API client
//! - [`content`] - Markdown posts and resume on the local filesystem

pub mod content;
pub mod openai;
