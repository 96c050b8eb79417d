//! Post routes - blog posts with embedded author details

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::db::repos::{PostRepo, UserRepo};
use crate::error::{ApiError, ApiResult};
use crate::models::post::{CreatePost, Post, UpdatePost};
use crate::state::AppState;

/// POST /posts - Create a new post
pub async fn create_post(
    State(state): State<AppState>,
    Json(req): Json<CreatePost>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    req.validate()?;

    // The owning user must exist before the insert.
    if !UserRepo::new(state.pool()).exists(&req.user_id).await? {
        return Err(ApiError::NotFound {
            resource: "user",
            id: req.user_id.clone(),
        });
    }

    let post = PostRepo::new(state.pool())
        .create(&req.title, &req.body, &req.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// GET /posts - List all posts, newest first
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    let posts = PostRepo::new(state.pool()).list().await?;
    Ok(Json(posts.into_iter().map(Post::from).collect()))
}

/// GET /posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Post>> {
    let post = PostRepo::new(state.pool()).get(id).await?;
    Ok(Json(post.into()))
}

/// PUT /posts/{id} - Partial update; absent fields stay untouched
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePost>,
) -> ApiResult<Json<Post>> {
    let title = req.title_patch()?;
    let body = req.body_patch()?;

    let repo = PostRepo::new(state.pool());
    let existing = repo.get(id).await?;

    let title = title.filter(|v| *v != existing.title.as_str());
    let body = body.filter(|v| *v != existing.body.as_str());

    if title.is_none() && body.is_none() {
        return Ok(Json(existing.into()));
    }

    let post = repo.update(id, title, body).await?;
    Ok(Json(post.into()))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    PostRepo::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
