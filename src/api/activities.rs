use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{ActivityDto, ActivityInput, ApiError, ApiResponse, AppState};
use crate::api::validation::validate_id;
use crate::db::Store;

pub(super) async fn ensure_user_exists(store: &Store, user_id: Uuid) -> Result<(), ApiError> {
    if store.users().get(user_id).await?.is_none() {
        return Err(ApiError::validation(format!(
            "Invalid user_id \"{user_id}\" - object does not exist"
        )));
    }
    Ok(())
}

async fn load_activity(store: &Store, id: Uuid) -> Result<ActivityDto, ApiError> {
    store
        .activities()
        .get(id)
        .await?
        .map(ActivityDto::from)
        .ok_or_else(|| ApiError::not_found("Activity", id))
}

pub async fn list_activities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ActivityDto>>>, ApiError> {
    let activities = state.store().activities().list().await?;
    let dtos = activities.into_iter().map(ActivityDto::from).collect();

    Ok(Json(ApiResponse::success(dtos)))
}

pub async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ActivityDto>>, ApiError> {
    let id = validate_id("activity", &id)?;

    Ok(Json(ApiResponse::success(
        load_activity(state.store(), id).await?,
    )))
}

pub async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ActivityInput>,
) -> Result<(StatusCode, Json<ApiResponse<ActivityDto>>), ApiError> {
    let new_activity = payload.validate()?;
    let store = state.store();
    ensure_user_exists(store, new_activity.user_id).await?;

    let activity = store.activities().create(new_activity).await?;
    tracing::info!(activity_id = %activity.id, user_id = %activity.user_id, "Activity logged");

    let dto = load_activity(store, activity.id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
}

pub async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ActivityInput>,
) -> Result<Json<ApiResponse<ActivityDto>>, ApiError> {
    let id = validate_id("activity", &id)?;
    let new_activity = payload.validate()?;
    let store = state.store();
    ensure_user_exists(store, new_activity.user_id).await?;

    store
        .activities()
        .update(id, new_activity)
        .await?
        .ok_or_else(|| ApiError::not_found("Activity", id))?;

    Ok(Json(ApiResponse::success(load_activity(store, id).await?)))
}

pub async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("activity", &id)?;

    if !state.store().activities().delete(id).await? {
        return Err(ApiError::not_found("Activity", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
