use std::fmt;

use uuid::Uuid;

use crate::entities::{activities, users};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub user_id: Uuid,
    pub activity_type: String,
    pub duration_seconds: i64,
}

/// An activity with its owning user loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityWithUser {
    pub activity: activities::Model,
    pub user: users::Model,
}

impl fmt::Display for ActivityWithUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.user.username, self.activity.activity_type)
    }
}
