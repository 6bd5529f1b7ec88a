//! Blog post entities.

use serde::{Deserialize, Serialize};

/// Metadata block at the top of a post's markdown file.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PostMeta {
    pub title: String,
    /// Raw date as written in the file; formatted at render time.
    pub date: String,
    pub description: String,
    pub author: String,
    pub image: String,
    pub keywords: Vec<String>,
}

/// A post listed on the blog index.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostSummary {
    /// File stem of the markdown file.
    pub id: String,
    #[serde(flatten)]
    pub meta: PostMeta,
}

/// A fully rendered post.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    pub id: String,
    #[serde(flatten)]
    pub meta: PostMeta,
    pub content_html: String,
}
