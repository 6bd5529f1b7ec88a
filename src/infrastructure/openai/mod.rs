//! OpenAI Images API client.

mod provider;

pub use provider::OpenAiImageProvider;
