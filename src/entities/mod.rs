pub mod prelude;

pub mod activities;
pub mod leaderboard;
pub mod team_members;
pub mod teams;
pub mod users;
pub mod workouts;
