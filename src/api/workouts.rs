use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, WorkoutDto, WorkoutInput};
use crate::api::validation::validate_id;

pub async fn list_workouts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<WorkoutDto>>>, ApiError> {
    let workouts = state.store().workouts().list().await?;
    let dtos = workouts.into_iter().map(WorkoutDto::from).collect();

    Ok(Json(ApiResponse::success(dtos)))
}

pub async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<WorkoutDto>>, ApiError> {
    let id = validate_id("workout", &id)?;
    let workout = state
        .store()
        .workouts()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Workout", id))?;

    Ok(Json(ApiResponse::success(workout.into())))
}

pub async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WorkoutInput>,
) -> Result<(StatusCode, Json<ApiResponse<WorkoutDto>>), ApiError> {
    let new_workout = payload.validate()?;
    let workout = state.store().workouts().create(new_workout).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(workout.into()))))
}

pub async fn update_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<WorkoutInput>,
) -> Result<Json<ApiResponse<WorkoutDto>>, ApiError> {
    let id = validate_id("workout", &id)?;
    let new_workout = payload.validate()?;

    let workout = state
        .store()
        .workouts()
        .update(id, new_workout)
        .await?
        .ok_or_else(|| ApiError::not_found("Workout", id))?;

    Ok(Json(ApiResponse::success(workout.into())))
}

pub async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("workout", &id)?;

    if !state.store().workouts().delete(id).await? {
        return Err(ApiError::not_found("Workout", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
