//! Route handlers for the jotter API
//!
//! Organized by resource type:
//! - users: accounts, addressed by external id
//! - posts: blog posts with embedded author details
//! - todos: task items, including batch update
//! - health: API info and health check

pub mod health;
pub mod posts;
pub mod todos;
pub mod users;

use axum::routing::{get, put};
use axum::Router;

use crate::state::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::api_info))
        .route("/health", get(health::health_check))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route("/todos/batch", put(todos::batch_update_todos))
        .route(
            "/todos/{id}",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        )
}
