//! Request handlers for post and comment routes.

use crate::dto::{
    CreateCommentRequest, CreatePostRequest, CreatedResponse, GetAllResponse, PageParams,
};
use crate::error::{ApiError, ErrorReply};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use blogpost_core::{Post, PostId};
use validator::Validate;

/// GET /ping
pub async fn ping() -> &'static str {
    blogpost_core::ping()
}

/// GET /api/posts?page=&limit=
///
/// Unparsable or non-positive parameters fall back to `page=1`, `limit=10`.
pub async fn get_all_posts(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<GetAllResponse>, ErrorReply> {
    let cursor = query.map(|Query(params)| params).unwrap_or_default().cursor();
    let page = cursor.to_post_page();

    let blog_posts = state
        .with_service(move |service| service.get_all(&page))
        .await
        .map_err(|err| state.reply("unexpected error getting all blog posts", err))?;

    Ok(Json(GetAllResponse {
        blog_posts,
        pagination: cursor,
    }))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    id: Result<Path<PostId>, PathRejection>,
) -> Result<Json<Post>, ErrorReply> {
    let id = path_id(&state, id)?;
    let post = state
        .with_service(move |service| service.get_by_id(id))
        .await
        .map_err(|err| state.reply(format!("unexpected error getting post with ID ({id})"), err))?;
    Ok(Json(post))
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    body: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ErrorReply> {
    let request = validated_body(&state, "unexpected error reading post creation body", body)?;

    let id = state
        .with_service(move |service| service.create_post(&request.title, &request.content))
        .await
        .map_err(|err| state.reply("unexpected error creating post", err))?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::from(id))))
}

/// POST /api/posts/{id}/comments
///
/// A missing post maps to the `NotFound` status and nothing is written.
pub async fn create_comment(
    State(state): State<AppState>,
    id: Result<Path<PostId>, PathRejection>,
    body: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ErrorReply> {
    let post_id = path_id(&state, id)?;
    let request = validated_body(&state, "unexpected error reading comment creation body", body)?;

    let comment_id = state
        .with_service(move |service| service.create_comment(post_id, &request.text))
        .await
        .map_err(|err| state.reply("unexpected error creating comment", err))?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: comment_id })))
}

fn path_id(
    state: &AppState,
    id: Result<Path<PostId>, PathRejection>,
) -> Result<PostId, ErrorReply> {
    id.map(|Path(id)| id).map_err(|rejection| {
        state.reply(
            "invalid post ID",
            ApiError::Validation(rejection.body_text()),
        )
    })
}

fn validated_body<T: Validate>(
    state: &AppState,
    message: &str,
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, ErrorReply> {
    let Json(request) = body
        .map_err(|rejection| state.reply(message, ApiError::Validation(rejection.body_text())))?;
    request
        .validate()
        .map_err(|errors| state.reply(message, ApiError::from(errors)))?;
    Ok(request)
}
