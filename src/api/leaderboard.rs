use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::activities::ensure_user_exists;
use super::{ApiError, ApiResponse, AppState, LeaderboardEntryDto, LeaderboardInput};
use crate::api::validation::validate_id;
use crate::db::Store;

async fn load_entry(store: &Store, id: Uuid) -> Result<LeaderboardEntryDto, ApiError> {
    store
        .leaderboard()
        .get(id)
        .await?
        .map(LeaderboardEntryDto::from)
        .ok_or_else(|| ApiError::not_found("Leaderboard entry", id))
}

/// Entries ordered by score, highest first.
pub async fn list_leaderboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<LeaderboardEntryDto>>>, ApiError> {
    let entries = state.store().leaderboard().list().await?;
    let dtos = entries.into_iter().map(LeaderboardEntryDto::from).collect();

    Ok(Json(ApiResponse::success(dtos)))
}

pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LeaderboardEntryDto>>, ApiError> {
    let id = validate_id("leaderboard entry", &id)?;

    Ok(Json(ApiResponse::success(load_entry(state.store(), id).await?)))
}

pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LeaderboardInput>,
) -> Result<(StatusCode, Json<ApiResponse<LeaderboardEntryDto>>), ApiError> {
    let new_entry = payload.validate()?;
    let store = state.store();
    ensure_user_exists(store, new_entry.user_id).await?;

    let entry = store.leaderboard().create(new_entry).await?;
    let dto = load_entry(store, entry.id).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
}

pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<LeaderboardInput>,
) -> Result<Json<ApiResponse<LeaderboardEntryDto>>, ApiError> {
    let id = validate_id("leaderboard entry", &id)?;
    let new_entry = payload.validate()?;
    let store = state.store();
    ensure_user_exists(store, new_entry.user_id).await?;

    store
        .leaderboard()
        .update(id, new_entry)
        .await?
        .ok_or_else(|| ApiError::not_found("Leaderboard entry", id))?;

    Ok(Json(ApiResponse::success(load_entry(store, id).await?)))
}

pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("leaderboard entry", &id)?;

    if !state.store().leaderboard().delete(id).await? {
        return Err(ApiError::not_found("Leaderboard entry", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
