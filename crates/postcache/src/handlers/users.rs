use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use postcache_core::blog::{CreateUserRequest, UpdateUserRequest, User};

use super::{invalid_body, parse_id, AppError, CacheParams};
use crate::state::AppState;

/// List all users (GET /users).
pub async fn list_users(
    State(state): State<AppState>,
    Query(cache): Query<CacheParams>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state.users.select(cache.mode()).get_all_users().await?;
    Ok(Json(users))
}

/// Get a single user by ID (GET /users/{id}).
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(cache): Query<CacheParams>,
) -> Result<Json<User>, AppError> {
    let id = parse_id(&id, "user")?;
    let user = state.users.select(cache.mode()).get_user_by_id(id).await?;
    Ok(Json(user))
}

/// Create a new user (POST /users).
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(invalid_body)?;
    let user = state.users.cached().create_user(payload).await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Created new user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user (PUT /users/{id}). Only the fields present in the body change.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    let id = parse_id(&id, "user")?;
    let Json(payload) = payload.map_err(invalid_body)?;
    let user = state.users.cached().update_user(id, payload).await?;

    tracing::info!(user_id = %id, "Updated user");

    Ok(Json(user))
}

/// Delete a user by ID (DELETE /users/{id}).
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "user")?;
    state.users.cached().delete_user(id).await?;

    tracing::info!(user_id = %id, "Deleted user");

    Ok(StatusCode::NO_CONTENT)
}
