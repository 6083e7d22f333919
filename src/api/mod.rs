use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;

mod activities;
mod error;
mod leaderboard;
mod observability;
mod system;
mod teams;
mod types;
mod users;
pub mod validation;
mod workouts;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub start_time: Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }
}

#[must_use]
pub fn create_app_state(
    config: Config,
    store: Store,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        config,
        store,
        start_time: Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::from_config(&config.database).await?;
    Ok(create_app_state(config, store, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = &state.config().server.cors_allowed_origins;

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    api_routes()
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api", get(system::api_root))
        .route("/api/", get(system::api_root))
        .route("/api/health", get(system::health))
        .route("/api/metrics", get(observability::get_metrics))
        .route("/api/users/", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/{id}/",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/teams/", get(teams::list_teams).post(teams::create_team))
        .route(
            "/api/teams/{id}/",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .route("/api/teams/{id}/members/", post(teams::add_member))
        .route(
            "/api/activities/",
            get(activities::list_activities).post(activities::create_activity),
        )
        .route(
            "/api/activities/{id}/",
            get(activities::get_activity)
                .put(activities::update_activity)
                .delete(activities::delete_activity),
        )
        .route(
            "/api/leaderboard/",
            get(leaderboard::list_leaderboard).post(leaderboard::create_entry),
        )
        .route(
            "/api/leaderboard/{id}/",
            get(leaderboard::get_entry)
                .put(leaderboard::update_entry)
                .delete(leaderboard::delete_entry),
        )
        .route(
            "/api/workouts/",
            get(workouts::list_workouts).post(workouts::create_workout),
        )
        .route(
            "/api/workouts/{id}/",
            get(workouts::get_workout)
                .put(workouts::update_workout)
                .delete(workouts::delete_workout),
        )
}
