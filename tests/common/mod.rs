#![allow(dead_code)]

use axum::Router;
use axum::Extension;
use axum::extract::ConnectInfo;
use axum::extract::connect_info::MockConnectInfo;
use axum_test::TestServer;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tr1p_site::application::services::{
    ContentService, DrawerStore, HostResolver, ImageGenerationService, ImageSettings,
    LayoutSelector,
};
use tr1p_site::infrastructure::content::FsPostRepository;
use tr1p_site::infrastructure::openai::OpenAiImageProvider;
use tr1p_site::routes::build_router;
use tr1p_site::state::AppState;

pub const PRIMARY_HOST: &str = "tr1p.local:3000";
pub const GAMERAVEN_HOST: &str = "gameraven.local:3000";

/// Content directory with two posts and a resume.
pub fn create_content_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_post(
        dir.path(),
        "first-post",
        "title: First Post\ndate: 2024-01-05\ndescription: The first one",
        "Hello from the **first** post.",
    );
    write_post(
        dir.path(),
        "second-post",
        "title: Second Post\ndate: 2024-03-18T09:30:00",
        "The second post.",
    );
    std::fs::write(dir.path().join("resume.md"), "# Resume\n\nShips software.\n").unwrap();
    dir
}

pub fn write_post(root: &Path, id: &str, front_matter: &str, body: &str) {
    let posts = root.join("posts");
    std::fs::create_dir_all(&posts).unwrap();
    std::fs::write(
        posts.join(format!("{}.md", id)),
        format!("---\n{}\n---\n{}\n", front_matter, body),
    )
    .unwrap();
}

pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

pub fn test_settings() -> ImageSettings {
    ImageSettings {
        test_delay: Duration::from_millis(10),
        ..ImageSettings::default()
    }
}

/// State backed by `content_dir` and a provider at `provider_url`.
pub fn create_test_state_with(
    content_dir: &Path,
    provider_url: &str,
    api_key: Option<&str>,
    settings: ImageSettings,
) -> AppState {
    let resolver = Arc::new(HostResolver::builtin().unwrap());
    let provider = OpenAiImageProvider::new(
        provider_url,
        api_key.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap();

    let image_service = Arc::new(ImageGenerationService::new(Arc::new(provider), settings));
    let drawers = Arc::new(DrawerStore::new(image_service.clone(), false));
    let content_service = Arc::new(ContentService::new(Arc::new(FsPostRepository::new(
        content_dir.to_path_buf(),
    ))));

    AppState::new(
        Arc::new(LayoutSelector::new(resolver)),
        image_service,
        drawers,
        content_service,
        reqwest::Client::new(),
        static_dir(),
    )
}

/// State without an API key; live generations fail before any request.
pub fn create_test_state(content_dir: &Path) -> AppState {
    create_test_state_with(content_dir, "http://127.0.0.1:9", None, test_settings())
}

/// Full application router, with a fake peer address for rate limiting.
pub fn create_test_router(state: AppState) -> Router {
    let peer = SocketAddr::from(([127, 0, 0, 1], 4000));
    // The governor key extractor reads the `ConnectInfo` extension directly,
    // which `MockConnectInfo` does not populate.
    build_router(state, false)
        .layer(MockConnectInfo(peer))
        .layer(Extension(ConnectInfo(peer)))
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(create_test_router(state)).unwrap()
}
