//! Data access and provider traits for the domain layer.
//!
//! Traits define the contracts; implementations live in
//! `crate::infrastructure`. Mock implementations are generated via `mockall`
//! for unit tests.
//!
//! - [`PostRepository`] - markdown blog posts and resume
//! - [`ImageProvider`] - external image generation backend

pub mod image_provider;
pub mod post_repository;

pub use image_provider::{ImageProvider, ProviderError, ProviderImage, ProviderImageRequest};
pub use post_repository::PostRepository;

#[cfg(test)]
pub use image_provider::MockImageProvider;
#[cfg(test)]
pub use post_repository::MockPostRepository;
