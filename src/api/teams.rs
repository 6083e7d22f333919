use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{AddMemberRequest, ApiError, ApiResponse, AppState, TeamDto, TeamInput};
use crate::api::validation::validate_id;
use crate::db::Store;

/// Fails with a validation error naming the first id that is not a stored user.
async fn ensure_users_exist(store: &Store, ids: &[Uuid]) -> Result<(), ApiError> {
    let users = store.users();
    for id in ids {
        if users.get(*id).await?.is_none() {
            return Err(ApiError::validation(format!(
                "Invalid user_id \"{id}\" - object does not exist"
            )));
        }
    }
    Ok(())
}

async fn load_team(store: &Store, id: Uuid) -> Result<TeamDto, ApiError> {
    store
        .teams()
        .get_with_members(id)
        .await?
        .map(TeamDto::from)
        .ok_or_else(|| ApiError::not_found("Team", id))
}

pub async fn list_teams(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TeamDto>>>, ApiError> {
    let teams = state.store().teams().list_with_members().await?;
    let dtos = teams.into_iter().map(TeamDto::from).collect();

    Ok(Json(ApiResponse::success(dtos)))
}

pub async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TeamDto>>, ApiError> {
    let id = validate_id("team", &id)?;
    let team = load_team(state.store(), id).await?;

    Ok(Json(ApiResponse::success(team)))
}

pub async fn create_team(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TeamInput>,
) -> Result<(StatusCode, Json<ApiResponse<TeamDto>>), ApiError> {
    let (new_team, member_ids) = payload.validate()?;
    let store = state.store();
    ensure_users_exist(store, &member_ids).await?;

    let repo = store.teams();
    let team = repo.create(new_team).await?;
    for user_id in &member_ids {
        repo.add_member(team.id, *user_id).await?;
    }

    tracing::info!(team_id = %team.id, members = member_ids.len(), "Team created");
    let dto = load_team(store, team.id).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
}

/// Renames the team and adds any listed members. Existing members are kept.
pub async fn update_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<TeamInput>,
) -> Result<Json<ApiResponse<TeamDto>>, ApiError> {
    let id = validate_id("team", &id)?;
    let (new_team, member_ids) = payload.validate()?;
    let store = state.store();
    ensure_users_exist(store, &member_ids).await?;

    let repo = store.teams();
    repo.rename(id, new_team.name)
        .await?
        .ok_or_else(|| ApiError::not_found("Team", id))?;

    for user_id in &member_ids {
        repo.add_member(id, *user_id).await?;
    }

    Ok(Json(ApiResponse::success(load_team(store, id).await?)))
}

pub async fn add_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<Json<ApiResponse<TeamDto>>, ApiError> {
    let team_id = validate_id("team", &id)?;
    let user_id = validate_id("user", &payload.user_id)?;
    let store = state.store();

    if store.teams().get(team_id).await?.is_none() {
        return Err(ApiError::not_found("Team", team_id));
    }
    ensure_users_exist(store, &[user_id]).await?;

    let added = store.teams().add_member(team_id, user_id).await?;
    tracing::info!(%team_id, %user_id, added, "Team membership requested");

    Ok(Json(ApiResponse::success(load_team(store, team_id).await?)))
}

pub async fn delete_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("team", &id)?;

    if !state.store().teams().delete(id).await? {
        return Err(ApiError::not_found("Team", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
