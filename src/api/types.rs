//! Wire shapes for the HTTP API.
//!
//! Read shapes (`*Dto`) expand the owning user or member users inline and
//! render identifiers as strings. Write shapes (`*Input`) take plain user
//! identifiers and are validated into the repository input types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ApiError;
use super::validation::{
    validate_duration, validate_email, validate_id, validate_required, validate_username,
};
use crate::domain::format_duration;
use crate::entities::workouts::{self, DifficultyLevel};
use crate::entities::users;
use crate::models::{
    ActivityWithUser, LeaderboardEntryWithUser, NewActivity, NewLeaderboardEntry, NewTeam,
    NewUser, NewWorkout, TeamWithMembers,
};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<users::Model> for UserDto {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
        }
    }
}

impl fmt::Display for UserDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDto {
    pub id: String,
    pub name: String,
    pub members: Vec<UserDto>,
}

impl From<TeamWithMembers> for TeamDto {
    fn from(view: TeamWithMembers) -> Self {
        Self {
            id: view.team.id.to_string(),
            name: view.team.name,
            members: view.members.into_iter().map(UserDto::from).collect(),
        }
    }
}

impl fmt::Display for TeamDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDto {
    pub id: String,
    pub user: UserDto,
    pub activity_type: String,
    /// `[D ]HH:MM:SS`
    pub duration: String,
    pub date_created: DateTime<Utc>,
}

impl From<ActivityWithUser> for ActivityDto {
    fn from(view: ActivityWithUser) -> Self {
        Self {
            id: view.activity.id.to_string(),
            user: view.user.into(),
            activity_type: view.activity.activity_type,
            duration: format_duration(view.activity.duration_seconds),
            date_created: view.activity.date_created,
        }
    }
}

impl fmt::Display for ActivityDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.user.username, self.activity_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntryDto {
    pub id: String,
    pub user: UserDto,
    pub score: i32,
    pub date_updated: DateTime<Utc>,
}

impl From<LeaderboardEntryWithUser> for LeaderboardEntryDto {
    fn from(view: LeaderboardEntryWithUser) -> Self {
        Self {
            id: view.entry.id.to_string(),
            user: view.user.into(),
            score: view.entry.score,
            date_updated: view.entry.date_updated,
        }
    }
}

impl fmt::Display for LeaderboardEntryDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.user.username, self.score)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty_level: DifficultyLevel,
    pub date_created: DateTime<Utc>,
}

impl From<workouts::Model> for WorkoutDto {
    fn from(workout: workouts::Model) -> Self {
        Self {
            id: workout.id.to_string(),
            name: workout.name,
            description: workout.description,
            difficulty_level: workout.difficulty_level,
            date_created: workout.date_created,
        }
    }
}

impl fmt::Display for WorkoutDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct UserInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl UserInput {
    pub fn validate(self) -> Result<NewUser, ApiError> {
        let username = validate_username(&self.username)?.to_string();
        let email = validate_email(&self.email)?.to_string();
        validate_required("Password", &self.password)?;

        Ok(NewUser {
            username,
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamInput {
    pub name: String,
    #[serde(default)]
    pub member_ids: Vec<String>,
}

impl TeamInput {
    pub fn validate(self) -> Result<(NewTeam, Vec<Uuid>), ApiError> {
        let name = validate_required("Team name", &self.name)?;
        let members = self
            .member_ids
            .iter()
            .map(|id| validate_id("user", id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((NewTeam::new(name), members))
    }
}

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: String,
}

/// Accepts either `"01:30:00"` or `5400`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Seconds(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct ActivityInput {
    pub user_id: String,
    pub activity_type: String,
    pub duration: DurationInput,
}

impl ActivityInput {
    pub fn validate(self) -> Result<NewActivity, ApiError> {
        let user_id = validate_id("user", &self.user_id)?;
        let activity_type = validate_required("Activity type", &self.activity_type)?.to_string();
        let duration_seconds = validate_duration(&self.duration)?;

        Ok(NewActivity {
            user_id,
            activity_type,
            duration_seconds,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardInput {
    pub user_id: String,
    pub score: i32,
}

impl LeaderboardInput {
    pub fn validate(self) -> Result<NewLeaderboardEntry, ApiError> {
        Ok(NewLeaderboardEntry {
            user_id: validate_id("user", &self.user_id)?,
            score: self.score,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkoutInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub difficulty_level: DifficultyLevel,
}

impl WorkoutInput {
    pub fn validate(self) -> Result<NewWorkout, ApiError> {
        let name = validate_required("Workout name", &self.name)?.to_string();

        Ok(NewWorkout {
            name,
            description: self.description,
            difficulty_level: self.difficulty_level,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub uptime_seconds: u64,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> users::Model {
        users::Model {
            id: Uuid::new_v4(),
            username: name.to_string(),
            email: format!("{name}@octofit.edu"),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_user_projection_hides_password() {
        let dto = UserDto::from(user("testuser"));
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("password").is_none());
        assert!(json["id"].is_string());
        assert_eq!(dto.to_string(), "testuser");
    }

    #[test]
    fn test_activity_projection_expands_user() {
        let owner = user("testuser");
        let view = ActivityWithUser {
            activity: crate::entities::activities::Model {
                id: Uuid::new_v4(),
                user_id: owner.id,
                activity_type: "Running".to_string(),
                duration_seconds: 3600,
                date_created: Utc::now(),
            },
            user: owner,
        };

        let dto = ActivityDto::from(view);
        assert_eq!(dto.user.username, "testuser");
        assert_eq!(dto.duration, "01:00:00");
        assert_eq!(dto.to_string(), "testuser - Running");
    }

    #[test]
    fn test_activity_input_accepts_both_duration_forms() {
        let id = Uuid::new_v4();
        let text: ActivityInput = serde_json::from_value(serde_json::json!({
            "user_id": id.to_string(),
            "activity_type": "Running",
            "duration": "00:45:00"
        }))
        .unwrap();
        let secs: ActivityInput = serde_json::from_value(serde_json::json!({
            "user_id": id.to_string(),
            "activity_type": "Running",
            "duration": 2700
        }))
        .unwrap();

        assert_eq!(text.validate().unwrap().duration_seconds, 2700);
        assert_eq!(secs.validate().unwrap().duration_seconds, 2700);
    }

    #[test]
    fn test_team_input_rejects_bad_member_id() {
        let input = TeamInput {
            name: "Blue Team".to_string(),
            member_ids: vec!["nope".to_string()],
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_workout_difficulty_round_trips_as_label() {
        let input: WorkoutInput = serde_json::from_value(serde_json::json!({
            "name": "Test Workout",
            "description": "A test workout description",
            "difficulty_level": "Intermediate"
        }))
        .unwrap();
        let workout = input.validate().unwrap();
        assert_eq!(workout.difficulty_level, DifficultyLevel::Intermediate);
    }
}
