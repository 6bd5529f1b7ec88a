//! Business logic services for the application layer.

pub mod content_service;
pub mod drawer_service;
pub mod drawer_store;
pub mod host_resolver;
pub mod image_service;
pub mod layout_selector;

pub use content_service::{ContentIssue, ContentService, PostListing};
pub use drawer_service::{Drawer, DrawerError, DrawerSnapshot, ViewerState};
pub use drawer_store::{DrawerStore, run_session_sweeper};
pub use host_resolver::{HostResolver, RegistryError};
pub use image_service::{ImageGenerationService, ImageSettings, SAMPLE_IMAGES};
pub use layout_selector::LayoutSelector;
