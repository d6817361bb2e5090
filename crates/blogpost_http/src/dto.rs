//! Request and response bodies.

use blogpost_core::{PageCursor, Post, PostId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/posts`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}

/// Body of `POST /api/posts/{id}/comments`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

/// Returned by both create endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Body of `GET /api/posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAllResponse {
    pub blog_posts: Vec<Post>,
    pub pagination: PageCursor,
}

/// Raw `page`/`limit` query parameters.
///
/// Kept as strings so unparsable values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageParams {
    pub fn cursor(&self) -> PageCursor {
        PageCursor::from_raw(parse_number(&self.page), parse_number(&self.limit))
    }
}

fn parse_number(value: &Option<String>) -> Option<i64> {
    value.as_deref().and_then(|raw| raw.trim().parse().ok())
}

/// Convenience conversion for created post ids.
impl From<PostId> for CreatedResponse {
    fn from(id: PostId) -> Self {
        Self { id }
    }
}
