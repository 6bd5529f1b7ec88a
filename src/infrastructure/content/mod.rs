//! Markdown content stored on the local filesystem.

mod fs_post_repository;
mod markdown;

pub use fs_post_repository::{ContentError, FsPostRepository};
pub use markdown::{render_markdown, split_front_matter};
