//! Reset-and-seed workflow.
//!
//! Clears all five collections and writes the demonstration dataset from
//! [`seed_data`](super::seed_data) in dependency order: users, teams and
//! their memberships, activities, leaderboard entries, workouts.
//!
//! Each bulk insert is a single statement. Nothing spans collections, so a
//! failure part-way leaves earlier collections populated. Running the
//! workflow again starts from a clean slate and yields the same dataset.

use std::fmt;

use thiserror::Error;
use tracing::info;

use crate::db::{Store, StoreErrorKind};
use crate::domain::Collection;
use crate::entities::{teams, users};
use crate::models::{NewActivity, NewLeaderboardEntry};
use crate::services::seed_data;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to drop {collection}")]
    Drop {
        collection: Collection,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to insert {collection}")]
    Insert {
        collection: Collection,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to add {username} to {team}")]
    Membership {
        team: String,
        username: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to count {collection}")]
    Count {
        collection: Collection,
        #[source]
        source: anyhow::Error,
    },
}

impl SeedError {
    #[must_use]
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            Self::Drop { source, .. }
            | Self::Insert { source, .. }
            | Self::Membership { source, .. }
            | Self::Count { source, .. } => StoreErrorKind::classify(source),
        }
    }
}

/// Record counts observed after seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub users: u64,
    pub teams: u64,
    pub activities: u64,
    pub leaderboard: u64,
    pub workouts: u64,
}

impl SeedSummary {
    #[must_use]
    pub const fn get(&self, collection: Collection) -> u64 {
        match collection {
            Collection::Users => self.users,
            Collection::Teams => self.teams,
            Collection::Activities => self.activities,
            Collection::Leaderboard => self.leaderboard,
            Collection::Workouts => self.workouts,
        }
    }

    fn slot(&mut self, collection: Collection) -> &mut u64 {
        match collection {
            Collection::Users => &mut self.users,
            Collection::Teams => &mut self.teams,
            Collection::Activities => &mut self.activities,
            Collection::Leaderboard => &mut self.leaderboard,
            Collection::Workouts => &mut self.workouts,
        }
    }
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, collection) in Collection::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", collection.label(), self.get(collection))?;
        }
        Ok(())
    }
}

pub struct SeedService {
    store: Store,
}

impl SeedService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn run(&self) -> Result<SeedSummary, SeedError> {
        self.drop_all().await?;

        let users = self.seed_users().await?;
        self.seed_teams(&users).await?;
        self.seed_activities(&users).await?;
        self.seed_leaderboard(&users).await?;
        self.seed_workouts().await?;

        let summary = self.summary().await?;
        info!(%summary, "Database populated");
        Ok(summary)
    }

    /// Clears every collection. Stops at the first failure, before any insert.
    pub async fn drop_all(&self) -> Result<(), SeedError> {
        info!("Dropping existing collections...");
        for collection in Collection::ALL {
            let removed = self
                .store
                .clear(collection)
                .await
                .map_err(|source| SeedError::Drop { collection, source })?;
            info!(%collection, removed, "Collection cleared");
        }
        Ok(())
    }

    async fn seed_users(&self) -> Result<Vec<users::Model>, SeedError> {
        info!("Creating users...");
        let users = self
            .store
            .users()
            .insert_many(seed_data::users())
            .await
            .map_err(|source| SeedError::Insert {
                collection: Collection::Users,
                source,
            })?;
        info!("Created {} users", users.len());
        Ok(users)
    }

    async fn seed_teams(&self, users: &[users::Model]) -> Result<Vec<teams::Model>, SeedError> {
        info!("Creating teams...");
        let repo = self.store.teams();
        let teams = repo
            .insert_many(seed_data::teams())
            .await
            .map_err(|source| SeedError::Insert {
                collection: Collection::Teams,
                source,
            })?;

        let (first, second) = users.split_at(seed_data::FIRST_TEAM_SIZE.min(users.len()));
        for (team, members) in teams.iter().zip([first, second]) {
            for user in members {
                repo.add_member(team.id, user.id)
                    .await
                    .map_err(|source| SeedError::Membership {
                        team: team.name.clone(),
                        username: user.username.clone(),
                        source,
                    })?;
            }
        }

        info!("Created {} teams with members", teams.len());
        Ok(teams)
    }

    async fn seed_activities(&self, users: &[users::Model]) -> Result<(), SeedError> {
        info!("Creating activities...");
        let activities: Vec<NewActivity> = users
            .iter()
            .zip(seed_data::ACTIVITIES)
            .map(|(user, (activity_type, duration_seconds))| NewActivity {
                user_id: user.id,
                activity_type: activity_type.to_string(),
                duration_seconds,
            })
            .collect();

        let created = self
            .store
            .activities()
            .insert_many(activities)
            .await
            .map_err(|source| SeedError::Insert {
                collection: Collection::Activities,
                source,
            })?;
        info!("Created {} activities", created.len());
        Ok(())
    }

    async fn seed_leaderboard(&self, users: &[users::Model]) -> Result<(), SeedError> {
        info!("Creating leaderboard entries...");
        let entries: Vec<NewLeaderboardEntry> = users
            .iter()
            .zip(seed_data::SCORES)
            .map(|(user, score)| NewLeaderboardEntry {
                user_id: user.id,
                score,
            })
            .collect();

        let created = self
            .store
            .leaderboard()
            .insert_many(entries)
            .await
            .map_err(|source| SeedError::Insert {
                collection: Collection::Leaderboard,
                source,
            })?;
        info!("Created {} leaderboard entries", created.len());
        Ok(())
    }

    async fn seed_workouts(&self) -> Result<(), SeedError> {
        info!("Creating workouts...");
        let created = self
            .store
            .workouts()
            .insert_many(seed_data::workouts())
            .await
            .map_err(|source| SeedError::Insert {
                collection: Collection::Workouts,
                source,
            })?;
        info!("Created {} workouts", created.len());
        Ok(())
    }

    pub async fn summary(&self) -> Result<SeedSummary, SeedError> {
        let mut summary = SeedSummary::default();
        for collection in Collection::ALL {
            *summary.slot(collection) = self
                .store
                .count(collection)
                .await
                .map_err(|source| SeedError::Count { collection, source })?;
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display() {
        let summary = SeedSummary {
            users: 5,
            teams: 2,
            activities: 5,
            leaderboard: 5,
            workouts: 5,
        };
        assert_eq!(
            summary.to_string(),
            "Users: 5, Teams: 2, Activities: 5, Leaderboard entries: 5, Workouts: 5"
        );
    }

    #[test]
    fn test_seed_error_kind_defaults_to_other() {
        let err = SeedError::Insert {
            collection: Collection::Users,
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(err.kind(), StoreErrorKind::Other);
        assert_eq!(err.to_string(), "Failed to insert users");
    }
}
