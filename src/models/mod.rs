//! Write shapes handed to the repositories and the joined views they return.

pub mod activity;
pub mod leaderboard;
pub mod team;
pub mod user;
pub mod workout;

pub use activity::{ActivityWithUser, NewActivity};
pub use leaderboard::{LeaderboardEntryWithUser, NewLeaderboardEntry};
pub use team::{NewTeam, TeamWithMembers};
pub use user::NewUser;
pub use workout::NewWorkout;
