//! Domain layer containing site entities and provider contracts.
//!
//! - [`entities`] - sites, render decisions, drawer entries, posts
//! - [`repositories`] - traits for content access and image providers
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Behaviour lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
