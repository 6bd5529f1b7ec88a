//! Repository trait for markdown content.

use crate::domain::entities::{BlogPost, PostSummary};
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to blog posts and the resume.
///
/// # Implementations
///
/// - [`crate::infrastructure::content::FsPostRepository`] - markdown files on disk
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Lists every post, unsorted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the content directory cannot be read
    /// or a post's metadata block is malformed.
    async fn list(&self) -> Result<Vec<PostSummary>, AppError>;

    /// Loads and renders one post.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(BlogPost))` if found
    /// - `Ok(None)` if no post has this id
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on read or parse failures.
    async fn find(&self, id: &str) -> Result<Option<BlogPost>, AppError>;

    /// Loads the resume rendered as HTML.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the resume file is missing.
    async fn resume_html(&self) -> Result<String, AppError>;
}
