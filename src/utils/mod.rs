//! Helper functions used across the application.
//!
//! - [`extract_host`] - hostname extraction from HTTP headers
//! - [`formatted_date`] - long-form date formatting for post metadata
//! - [`session_id`] - random drawer session identifiers

pub mod extract_host;
pub mod formatted_date;
pub mod session_id;
