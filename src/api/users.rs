use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, UserDto, UserInput};
use crate::api::validation::validate_id;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let users = state.store().users().list().await?;
    let dtos = users.into_iter().map(UserDto::from).collect();

    Ok(Json(ApiResponse::success(dtos)))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let id = validate_id("user", &id)?;
    let user = state
        .store()
        .users()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    Ok(Json(ApiResponse::success(user.into())))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserInput>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let new_user = payload.validate()?;
    let repo = state.store().users();

    if repo.get_by_username(&new_user.username).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "A user with username '{}' already exists",
            new_user.username
        )));
    }

    let user = repo.create(new_user).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UserInput>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let id = validate_id("user", &id)?;
    let new_user = payload.validate()?;
    let repo = state.store().users();

    let taken = repo
        .get_by_username(&new_user.username)
        .await?
        .is_some_and(|other| other.id != id);

    if taken {
        return Err(ApiError::conflict(format!(
            "A user with username '{}' already exists",
            new_user.username
        )));
    }

    let user = repo
        .update(id, new_user)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    Ok(Json(ApiResponse::success(user.into())))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("user", &id)?;

    if !state.store().users().delete(id).await? {
        return Err(ApiError::not_found("User", id));
    }

    tracing::info!(user_id = %id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
