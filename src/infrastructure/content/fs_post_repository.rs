//! Filesystem implementation of the post repository.

use async_trait::async_trait;
use regex::Regex;
use serde_json::json;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, error};

use super::markdown::{render_markdown, split_front_matter};
use crate::domain::entities::{BlogPost, PostMeta, PostSummary};
use crate::domain::repositories::PostRepository;
use crate::error::AppError;

static POST_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl From<ContentError> for AppError {
    fn from(e: ContentError) -> Self {
        error!("Content error: {}", e);
        AppError::internal("Failed to load content", json!({ "reason": e.to_string() }))
    }
}

/// [`PostRepository`] reading markdown files from a content directory.
///
/// Layout:
///
/// ```text
/// <root>/resume.md
/// <root>/posts/<id>.md
/// ```
///
/// Files are read on every call, so edits show up without a restart.
pub struct FsPostRepository {
    root: PathBuf,
}

impl FsPostRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn posts_dir(&self) -> PathBuf {
        self.root.join("posts")
    }

    fn resume_path(&self) -> PathBuf {
        self.root.join("resume.md")
    }

    async fn read(path: &Path) -> Result<Option<String>, ContentError> {
        match tokio::fs::read_to_string(path).await {
            Ok(source) => Ok(Some(source)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ContentError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn parse_meta(path: &Path, source: &str) -> Result<(PostMeta, usize), ContentError> {
        let (front_matter, body) = split_front_matter(source);
        let meta = match front_matter {
            Some(yaml) if !yaml.trim().is_empty() => {
                serde_yaml::from_str(yaml).map_err(|source| ContentError::FrontMatter {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            _ => PostMeta::default(),
        };

        Ok((meta, source.len() - body.len()))
    }
}

#[async_trait]
impl PostRepository for FsPostRepository {
    async fn list(&self) -> Result<Vec<PostSummary>, AppError> {
        let dir = self.posts_dir();
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No posts directory at {}", dir.display());
                return Ok(Vec::new());
            }
            Err(source) => return Err(ContentError::Io { path: dir, source }.into()),
        };

        let mut posts = Vec::new();
        loop {
            let entry = entries.next_entry().await.map_err(|source| ContentError::Io {
                path: dir.clone(),
                source,
            })?;
            let Some(entry) = entry else { break };

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !POST_ID.is_match(id) {
                debug!("Skipping post with unsupported file name: {}", path.display());
                continue;
            }

            let Some(source) = Self::read(&path).await? else {
                continue;
            };
            let (meta, _) = Self::parse_meta(&path, &source)?;

            posts.push(PostSummary {
                id: id.to_string(),
                meta,
            });
        }

        Ok(posts)
    }

    async fn find(&self, id: &str) -> Result<Option<BlogPost>, AppError> {
        if !POST_ID.is_match(id) {
            return Ok(None);
        }

        let path = self.posts_dir().join(format!("{}.md", id));
        let Some(source) = Self::read(&path).await? else {
            return Ok(None);
        };

        let (meta, body_start) = Self::parse_meta(&path, &source)?;

        Ok(Some(BlogPost {
            id: id.to_string(),
            meta,
            content_html: render_markdown(&source[body_start..]),
        }))
    }

    async fn resume_html(&self) -> Result<String, AppError> {
        let path = self.resume_path();
        let source = Self::read(&path).await?.ok_or_else(|| {
            AppError::not_found("Resume not found", json!({ "path": path.display().to_string() }))
        })?;

        let (_, body) = split_front_matter(&source);
        Ok(render_markdown(body))
    }
}
