//! Server-rendered pages.
//!
//! Every page is wrapped in the layout chosen for the request's host.
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Page handlers
//! - [`page`] - Layout selection and page assembly
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod page;
pub mod routes;
