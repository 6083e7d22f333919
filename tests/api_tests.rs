use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use octofit::api::{ActivityDto, TeamDto, UserDto, WorkoutDto};
use octofit::config::Config;
use octofit::services::SeedService;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> (Arc<octofit::api::AppState>, Router) {
    let db_path =
        std::env::temp_dir().join(format!("octofit-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.database.url = Some(format!("sqlite:{}", db_path.display()));

    let state = octofit::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");
    let router = octofit::api::router(state.clone());
    (state, router)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn data<T: serde::de::DeserializeOwned>(body: &Value) -> T {
    serde_json::from_value(body["data"].clone()).unwrap()
}

async fn create_test_user(app: &Router) -> UserDto {
    let (status, body) = send(
        app,
        "POST",
        "/api/users/",
        Some(json!({
            "username": "testuser",
            "email": "testuser@example.com",
            "password": "testpassword"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    data(&body)
}

#[tokio::test]
async fn test_api_root_lists_resources() {
    let (_, app) = spawn_app().await;

    let (status, body) = send(&app, "GET", "/api/", None).await;
    assert_eq!(status, StatusCode::OK);

    let links = body["data"].as_object().unwrap();
    let keys: Vec<_> = links.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["activities", "leaderboard", "teams", "users", "workouts"]
    );
    assert_eq!(links["users"], "/api/users/");
}

#[tokio::test]
async fn test_list_endpoints_respond() {
    let (_, app) = spawn_app().await;

    for resource in ["users", "teams", "activities", "leaderboard", "workouts"] {
        let (status, body) = send(&app, "GET", &format!("/api/{resource}/"), None).await;
        assert_eq!(status, StatusCode::OK, "listing {resource}");
        assert_eq!(body["success"], true);
        assert!(body["data"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_user_lifecycle() {
    let (_, app) = spawn_app().await;
    let user = create_test_user(&app).await;
    assert_eq!(user.to_string(), "testuser");

    let (status, body) = send(&app, "GET", &format!("/api/users/{}/", user.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("password").is_none());

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/users/{}/", user.id),
        Some(json!({
            "username": "renamed",
            "email": "renamed@example.com",
            "password": "newpassword"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data::<UserDto>(&body).username, "renamed");

    let (status, _) = send(&app, "DELETE", &format!("/api/users/{}/", user.id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/api/users/{}/", user.id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let (_, app) = spawn_app().await;
    create_test_user(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/",
        Some(json!({
            "username": "testuser",
            "email": "other@example.com",
            "password": "x"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("testuser"));
}

#[tokio::test]
async fn test_invalid_input_is_rejected() {
    let (_, app) = spawn_app().await;

    let (status, _) = send(&app, "GET", "/api/users/not-an-id/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/users/",
        Some(json!({ "username": "", "email": "a@b.c", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/users/",
        Some(json!({ "username": "bob", "email": "nope", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = uuid::Uuid::new_v4();
    let (status, body) = send(
        &app,
        "POST",
        "/api/activities/",
        Some(json!({
            "user_id": missing.to_string(),
            "activity_type": "Running",
            "duration": "01:00:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("does not exist"));

    let (status, _) = send(&app, "GET", &format!("/api/workouts/{missing}/"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_activity_expands_user() {
    let (_, app) = spawn_app().await;
    let user = create_test_user(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/activities/",
        Some(json!({
            "user_id": user.id,
            "activity_type": "Running",
            "duration": 1800
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let activity: ActivityDto = data(&body);
    assert_eq!(activity.to_string(), "testuser - Running");
    assert_eq!(activity.duration, "00:30:00");
    assert_eq!(activity.user, user);

    let (status, _) = send(
        &app,
        "POST",
        "/api/activities/",
        Some(json!({
            "user_id": user.id,
            "activity_type": "Running",
            "duration": "-00:10:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/activities/",
        Some(json!({
            "user_id": user.id,
            "activity_type": "Running",
            "duration": "9223372036854775:00:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_leaderboard_and_workout_projections() {
    let (_, app) = spawn_app().await;
    let user = create_test_user(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/leaderboard/",
        Some(json!({ "user_id": user.id, "score": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["username"], "testuser");
    assert_eq!(body["data"]["score"], 100);

    let (status, body) = send(
        &app,
        "POST",
        "/api/workouts/",
        Some(json!({
            "name": "Test Workout",
            "description": "A test workout description",
            "difficulty_level": "Beginner"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let workout: WorkoutDto = data(&body);
    assert_eq!(workout.to_string(), "Test Workout");
}

#[tokio::test]
async fn test_team_members_are_expanded_after_seed() {
    let (state, app) = spawn_app().await;
    SeedService::new(state.store().clone()).run().await.unwrap();

    let (status, body) = send(&app, "GET", "/api/teams/", None).await;
    assert_eq!(status, StatusCode::OK);

    let teams: Vec<TeamDto> = data(&body);
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].to_string(), "Blue Team");
    assert_eq!(teams[0].members.len(), 3);
    assert!(
        teams[1]
            .members
            .iter()
            .all(|m| m.email.ends_with("@merington.edu"))
    );

    let (status, body) = send(&app, "GET", "/api/activities/", None).await;
    assert_eq!(status, StatusCode::OK);
    let activities: Vec<ActivityDto> = data(&body);
    assert_eq!(activities.len(), 5);
    assert!(activities.iter().all(|a| !a.user.username.is_empty()));
}

#[tokio::test]
async fn test_team_membership_endpoint() {
    let (_, app) = spawn_app().await;
    let user = create_test_user(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/teams/",
        Some(json!({ "name": "Blue Team" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let team: TeamDto = data(&body);
    assert!(team.members.is_empty());

    let uri = format!("/api/teams/{}/members/", team.id);
    for _ in 0..2 {
        let (status, body) = send(&app, "POST", &uri, Some(json!({ "user_id": user.id }))).await;
        assert_eq!(status, StatusCode::OK);
        let team: TeamDto = data(&body);
        assert_eq!(team.members, vec![user.clone()]);
    }

    let (status, _) = send(&app, "DELETE", &format!("/api/teams/{}/", team.id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_health_reports_store() {
    let (_, app) = spawn_app().await;

    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], true);
}
