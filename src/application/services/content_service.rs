//! Blog and resume content.

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{BlogPost, PostSummary};
use crate::domain::repositories::PostRepository;
use crate::error::AppError;
use crate::utils::formatted_date::{DateError, get_formatted_date, parse_date};

/// A post summary with its date already formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct PostListing {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub formatted_date: String,
}

/// Outcome of checking one post's metadata.
#[derive(Debug)]
pub struct ContentIssue {
    pub post_id: String,
    pub error: DateError,
}

/// Service for reading blog posts and the resume.
pub struct ContentService {
    repository: Arc<dyn PostRepository>,
}

impl ContentService {
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }

    /// Lists posts newest first.
    ///
    /// Posts whose dates cannot be parsed sort last; they fail when
    /// formatted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on read failures.
    pub async fn list_posts(&self) -> Result<Vec<PostSummary>, AppError> {
        let mut posts = self.repository.list().await?;
        posts.sort_by(|a, b| {
            parse_date(&b.meta.date)
                .cmp(&parse_date(&a.meta.date))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(posts)
    }

    /// Lists posts with display dates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if any post carries an invalid date.
    pub async fn list_posts_for_display(&self) -> Result<Vec<PostListing>, AppError> {
        self.list_posts()
            .await?
            .into_iter()
            .map(|summary| {
                let formatted_date = get_formatted_date(&summary.meta.date)?;
                Ok(PostListing {
                    summary,
                    formatted_date,
                })
            })
            .collect()
    }

    /// Loads a post by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no post has this id.
    pub async fn get_post(&self, id: &str) -> Result<BlogPost, AppError> {
        self.repository
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "id": id })))
    }

    /// Loads the resume as HTML.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the resume is missing.
    pub async fn resume_html(&self) -> Result<String, AppError> {
        self.repository.resume_html().await
    }

    /// Checks every post's date, returning the ones that would fail to render.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on read failures.
    pub async fn check_posts(&self) -> Result<Vec<ContentIssue>, AppError> {
        let posts = self.repository.list().await?;
        Ok(posts
            .into_iter()
            .filter_map(|post| {
                get_formatted_date(&post.meta.date)
                    .err()
                    .map(|error| ContentIssue {
                        post_id: post.id,
                        error,
                    })
            })
            .collect())
    }
}
