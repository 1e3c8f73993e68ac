//! Aggregated user views. These never go through the cache.

use axum::{
    extract::{Path, State},
    Json,
};

use postcache_core::blog::UserDetail;

use super::{parse_id, AppError};
use crate::state::AppState;

/// GET /users/{id}/detail
pub async fn get_user_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserDetail>, AppError> {
    let id = parse_id(&id, "user")?;
    let detail = state.user_details.get_user_detail(id).await?;
    Ok(Json(detail))
}

/// GET /users/username/{username}/detail
pub async fn get_user_detail_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserDetail>, AppError> {
    let detail = state
        .user_details
        .get_user_detail_by_username(&username)
        .await?;
    Ok(Json(detail))
}
