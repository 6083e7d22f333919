pub use super::activities::Entity as Activities;
pub use super::leaderboard::Entity as Leaderboard;
pub use super::team_members::Entity as TeamMembers;
pub use super::teams::Entity as Teams;
pub use super::users::Entity as Users;
pub use super::workouts::Entity as Workouts;
