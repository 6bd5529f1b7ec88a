//! HTML page handlers.

mod generate;
mod home;
mod posts;
mod resume;

pub use generate::generate_handler;
pub use home::home_handler;
pub use posts::{post_handler, posts_handler};
pub use resume::resume_handler;
