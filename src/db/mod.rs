use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::Collection;

pub mod migrator;
pub mod repositories;

pub use repositories::{
    ActivityRepository, LeaderboardRepository, TeamRepository, UserRepository, WorkoutRepository,
};

/// Broad classification of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The store could not be reached or a connection could not be acquired.
    Connectivity,
    /// A unique field (e.g. username) was duplicated.
    Integrity,
    /// A record referenced a row that does not exist.
    Reference,
    Other,
}

impl StoreErrorKind {
    /// Walks the error chain looking for the underlying [`DbErr`].
    #[must_use]
    pub fn classify(err: &anyhow::Error) -> Self {
        err.chain()
            .find_map(|e| e.downcast_ref::<DbErr>())
            .map_or(Self::Other, Self::from_db_err)
    }

    #[must_use]
    pub fn from_db_err(err: &DbErr) -> Self {
        if matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) {
            return Self::Connectivity;
        }

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Integrity,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => Self::Reference,
            _ => Self::Other,
        }
    }
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::with_pool_options(
            &config.connection_url(),
            config.max_connections,
            config.min_connections,
        )
        .await
    }

    /// Opens a store backed by exactly one connection.
    pub async fn single_connection(config: &DatabaseConfig) -> Result<Self> {
        Self::with_pool_options(&config.connection_url(), 1, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let sqlite_path = db_url
            .strip_prefix("sqlite:")
            .filter(|p| !p.contains(":memory:"))
            .map(|p| p.trim_start_matches("//"))
            .and_then(|p| p.split('?').next());

        if let Some(path_str) = sqlite_path {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn teams(&self) -> TeamRepository {
        TeamRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn activities(&self) -> ActivityRepository {
        ActivityRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn leaderboard(&self) -> LeaderboardRepository {
        LeaderboardRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn workouts(&self) -> WorkoutRepository {
        WorkoutRepository::new(self.conn.clone())
    }

    /// Removes every record of `collection`. Clearing teams also clears memberships.
    pub async fn clear(&self, collection: Collection) -> Result<u64> {
        match collection {
            Collection::Users => self.users().clear().await,
            Collection::Teams => self.teams().clear().await,
            Collection::Activities => self.activities().clear().await,
            Collection::Leaderboard => self.leaderboard().clear().await,
            Collection::Workouts => self.workouts().clear().await,
        }
    }

    pub async fn count(&self, collection: Collection) -> Result<u64> {
        match collection {
            Collection::Users => self.users().count().await,
            Collection::Teams => self.teams().count().await,
            Collection::Activities => self.activities().count().await,
            Collection::Leaderboard => self.leaderboard().count().await,
            Collection::Workouts => self.workouts().count().await,
        }
    }
}
