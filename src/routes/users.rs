//! User routes - accounts addressed by external id

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::db::repos::UserRepo;
use crate::error::{ApiError, ApiResult};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::state::AppState;

/// POST /users - Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    req.validate()?;

    let repo = UserRepo::new(state.pool());
    if repo.email_taken(&req.email, None).await? {
        return Err(ApiError::Conflict(format!(
            "email '{}' is already registered",
            req.email
        )));
    }

    // External id: assigned once here, never reassigned.
    let user_id = Uuid::new_v4().to_string();
    let user = repo.create(&req.name, &req.email, &user_id).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users - List all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = UserRepo::new(state.pool()).list().await?;
    Ok(Json(users.into_iter().map(User::from).collect()))
}

/// GET /users/{user_id} - Get a user by external id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<User>> {
    let user = UserRepo::new(state.pool()).get(&user_id).await?;
    Ok(Json(user.into()))
}

/// PUT /users/{user_id} - Partial update; absent fields stay untouched
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<UpdateUser>,
) -> ApiResult<Json<User>> {
    let name = req.name_patch()?;
    let email = req.email_patch()?;

    let repo = UserRepo::new(state.pool());
    let existing = repo.get(&user_id).await?;

    // Only fields that actually differ count as changes.
    let name = name.filter(|v| *v != existing.name.as_str());
    let email = email.filter(|v| *v != existing.email.as_str());

    if name.is_none() && email.is_none() {
        return Ok(Json(existing.into()));
    }

    if let Some(email) = email {
        if repo.email_taken(email, Some(&user_id)).await? {
            return Err(ApiError::Conflict(format!(
                "email '{}' is already registered",
                email
            )));
        }
    }

    let user = repo.update(&user_id, name, email).await?;
    Ok(Json(user.into()))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<StatusCode> {
    UserRepo::new(state.pool()).delete(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
