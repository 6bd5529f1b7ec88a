//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod drawer;
pub mod health;
pub mod images;

pub use drawer::{
    close_viewer_handler, dismiss_entry_handler, download_entry_handler, drawer_handler,
    open_viewer_handler, submit_entry_handler, viewer_next_handler, viewer_previous_handler,
};
pub use health::health_handler;
pub use images::generate_image_handler;
