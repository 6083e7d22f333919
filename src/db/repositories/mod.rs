pub mod activity;
pub mod leaderboard;
pub mod team;
pub mod user;
pub mod workout;

pub use activity::ActivityRepository;
pub use leaderboard::LeaderboardRepository;
pub use team::TeamRepository;
pub use user::UserRepository;
pub use workout::WorkoutRepository;
