//! Todo routes - task items, including all-or-nothing batch update

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::db::repos::{TodoPatch, TodoRepo};
use crate::error::ApiResult;
use crate::models::todo::{BatchTodoUpdate, CreateTodo, Todo, UpdateTodo};
use crate::state::AppState;

/// POST /todos - Create a new todo
pub async fn create_todo(
    State(state): State<AppState>,
    Json(req): Json<CreateTodo>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    req.validate()?;

    let todo = TodoRepo::new(state.pool())
        .create(&req.task, req.completed)
        .await?;

    Ok((StatusCode::CREATED, Json(todo.into())))
}

/// GET /todos - List all todos, most recent first
pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<Todo>>> {
    let todos = TodoRepo::new(state.pool()).list().await?;
    Ok(Json(todos.into_iter().map(Todo::from).collect()))
}

/// GET /todos/{id}
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Todo>> {
    let todo = TodoRepo::new(state.pool()).get(id).await?;
    Ok(Json(todo.into()))
}

/// PUT /todos/{id} - Partial update; absent fields stay untouched
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTodo>,
) -> ApiResult<Json<Todo>> {
    let task = req.task_patch()?;
    let completed = req.completed_patch()?;

    let repo = TodoRepo::new(state.pool());
    let existing = repo.get(id).await?;

    let task = task.filter(|v| *v != existing.task.as_str());
    let completed = completed.filter(|v| *v != existing.completed);

    if task.is_none() && completed.is_none() {
        return Ok(Json(existing.into()));
    }

    let todo = repo.update(id, task, completed).await?;
    Ok(Json(todo.into()))
}

/// PUT /todos/batch - All-or-nothing batch update
///
/// Every item is validated before any write; a single missing id fails the
/// whole batch. The response preserves request order.
pub async fn batch_update_todos(
    State(state): State<AppState>,
    Json(req): Json<Vec<BatchTodoUpdate>>,
) -> ApiResult<Json<Vec<Todo>>> {
    let mut patches = Vec::with_capacity(req.len());
    for item in &req {
        patches.push(TodoPatch {
            id: item.id,
            task: item.patch.task_patch()?,
            completed: item.patch.completed_patch()?,
        });
    }

    let todos = TodoRepo::new(state.pool()).update_many(&patches).await?;
    Ok(Json(todos.into_iter().map(Todo::from).collect()))
}

/// DELETE /todos/{id}
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    TodoRepo::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
