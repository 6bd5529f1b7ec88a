//! Blog index and post page handlers.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};

use crate::application::services::PostListing;
use crate::domain::entities::{BlogPost, route_content};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::formatted_date::get_formatted_date;
use crate::web::page::Page;

#[derive(Template)]
#[template(path = "pages/posts.html")]
struct PostsTemplate {
    posts: Vec<PostListing>,
}

#[derive(Template)]
#[template(path = "pages/post.html")]
struct PostTemplate {
    post: BlogPost,
    published: String,
}

/// Renders the blog index, newest first.
///
/// # Endpoint
///
/// `GET /posts`
///
/// # Errors
///
/// Returns 500 if any post carries an invalid date.
pub async fn posts_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let page = Page::select(&state, &headers, &route_content::POSTS);

    let page = if page.wants_slot() {
        let posts = state.content_service.list_posts_for_display().await?;
        let html = PostsTemplate { posts }.render()?;
        page.with_slot(Some(html))
    } else {
        page
    };

    page.render("Blog", None)
}

/// Renders a single post.
///
/// # Endpoint
///
/// `GET /posts/{id}`
///
/// # Errors
///
/// - 404 if no post has this id
/// - 500 if the post's date is invalid
pub async fn post_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let page = Page::select(&state, &headers, &route_content::POST);

    let mut title = String::from("Post");
    let page = if page.wants_slot() {
        let post = state.content_service.get_post(&id).await?;
        let published = get_formatted_date(&post.meta.date)?;
        title.clone_from(&post.meta.title);

        let html = PostTemplate { post, published }.render()?;
        page.with_slot(Some(html))
    } else {
        page
    };

    page.render(&title, None)
}
