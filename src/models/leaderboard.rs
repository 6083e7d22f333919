use std::fmt;

use uuid::Uuid;

use crate::entities::{leaderboard, users};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeaderboardEntry {
    pub user_id: Uuid,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntryWithUser {
    pub entry: leaderboard::Model,
    pub user: users::Model,
}

impl fmt::Display for LeaderboardEntryWithUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.user.username, self.entry.score)
    }
}
