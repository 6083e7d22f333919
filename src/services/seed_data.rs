//! The fixed demonstration dataset written by the seeding workflow.

use crate::entities::workouts::DifficultyLevel;
use crate::models::{NewTeam, NewUser, NewWorkout};

pub const USERNAMES: [&str; 5] = [
    "thundergod",
    "metalgeek",
    "zerocool",
    "crashoverride",
    "sleeptoken",
];

pub const EMAIL_DOMAIN: &str = "merington.edu";

pub const TEAM_NAMES: [&str; 2] = ["Blue Team", "Gold Team"];

/// Users `[0, FIRST_TEAM_SIZE)` join the first team, the rest join the second.
pub const FIRST_TEAM_SIZE: usize = 3;

/// One activity per user, in `USERNAMES` order: (type, duration in seconds).
pub const ACTIVITIES: [(&str, i64); 5] = [
    ("Cycling", 60 * 60),
    ("Crossfit", 2 * 60 * 60),
    ("Running", 90 * 60),
    ("Strength", 30 * 60),
    ("Swimming", 75 * 60),
];

/// One leaderboard score per user, in `USERNAMES` order.
pub const SCORES: [i32; 5] = [100, 90, 95, 85, 80];

pub const WORKOUTS: [(&str, &str, DifficultyLevel); 5] = [
    (
        "Cycling Training",
        "Training for a road cycling event",
        DifficultyLevel::Intermediate,
    ),
    (
        "Crossfit WOD",
        "Training for a crossfit competition",
        DifficultyLevel::Advanced,
    ),
    (
        "Running Training",
        "Training for a marathon",
        DifficultyLevel::Intermediate,
    ),
    (
        "Strength Training",
        "Training for strength building",
        DifficultyLevel::Beginner,
    ),
    (
        "Swimming Training",
        "Training for a swimming competition",
        DifficultyLevel::Intermediate,
    ),
];

#[must_use]
pub fn users() -> Vec<NewUser> {
    USERNAMES
        .iter()
        .map(|name| {
            NewUser::new(
                *name,
                format!("{name}@{EMAIL_DOMAIN}"),
                format!("{name}password"),
            )
        })
        .collect()
}

#[must_use]
pub fn teams() -> Vec<NewTeam> {
    TEAM_NAMES.iter().map(|name| NewTeam::new(*name)).collect()
}

#[must_use]
pub fn workouts() -> Vec<NewWorkout> {
    WORKOUTS
        .iter()
        .map(|(name, description, level)| NewWorkout {
            name: (*name).to_string(),
            description: (*description).to_string(),
            difficulty_level: *level,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_usernames_and_emails_are_distinct() {
        let users = users();
        let names: HashSet<_> = users.iter().map(|u| u.username.as_str()).collect();
        let emails: HashSet<_> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(names.len(), USERNAMES.len());
        assert_eq!(emails.len(), USERNAMES.len());
        assert_eq!(users[0].email, "thundergod@merington.edu");
    }

    #[test]
    fn test_per_user_tables_cover_every_user() {
        assert_eq!(ACTIVITIES.len(), USERNAMES.len());
        assert_eq!(SCORES.len(), USERNAMES.len());
        assert!(FIRST_TEAM_SIZE < USERNAMES.len());
        assert!(ACTIVITIES.iter().all(|(_, secs)| *secs >= 0));
    }

    #[test]
    fn test_workouts_have_names() {
        assert!(workouts().iter().all(|w| !w.name.is_empty()));
        assert_eq!(workouts()[1].difficulty_level, DifficultyLevel::Advanced);
    }
}
