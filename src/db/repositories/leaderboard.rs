use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{leaderboard, prelude::*, users};
use crate::models::{LeaderboardEntryWithUser, NewLeaderboardEntry};

pub struct LeaderboardRepository {
    conn: DatabaseConnection,
}

impl LeaderboardRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn build(entry: NewLeaderboardEntry) -> leaderboard::Model {
        leaderboard::Model {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            score: entry.score,
            date_updated: chrono::Utc::now(),
        }
    }

    fn to_active(model: &leaderboard::Model) -> leaderboard::ActiveModel {
        leaderboard::ActiveModel {
            id: Set(model.id),
            user_id: Set(model.user_id),
            score: Set(model.score),
            date_updated: Set(model.date_updated),
        }
    }

    fn join(
        (entry, user): (leaderboard::Model, Option<users::Model>),
    ) -> Result<LeaderboardEntryWithUser> {
        let user = user.ok_or_else(|| {
            anyhow::anyhow!(
                "Leaderboard entry {} references missing user {}",
                entry.id,
                entry.user_id
            )
        })?;

        Ok(LeaderboardEntryWithUser { entry, user })
    }

    pub async fn create(&self, entry: NewLeaderboardEntry) -> Result<leaderboard::Model> {
        let model = Self::build(entry);
        Self::to_active(&model)
            .insert(&self.conn)
            .await
            .context("Failed to create leaderboard entry")
    }

    pub async fn insert_many(
        &self,
        entries: Vec<NewLeaderboardEntry>,
    ) -> Result<Vec<leaderboard::Model>> {
        let models: Vec<leaderboard::Model> = entries.into_iter().map(Self::build).collect();
        if models.is_empty() {
            return Ok(models);
        }

        Leaderboard::insert_many(models.iter().map(Self::to_active))
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to bulk insert leaderboard entries")?;

        Ok(models)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<LeaderboardEntryWithUser>> {
        let row = Leaderboard::find_by_id(id)
            .find_also_related(Users)
            .one(&self.conn)
            .await
            .context("Failed to query leaderboard entry by ID")?;

        row.map(Self::join).transpose()
    }

    /// All entries, highest score first.
    pub async fn list(&self) -> Result<Vec<LeaderboardEntryWithUser>> {
        Leaderboard::find()
            .find_also_related(Users)
            .order_by_desc(leaderboard::Column::Score)
            .all(&self.conn)
            .await
            .context("Failed to list leaderboard")?
            .into_iter()
            .map(Self::join)
            .collect()
    }

    /// Replaces owner and score, restamping `date_updated`.
    pub async fn update(
        &self,
        id: Uuid,
        entry: NewLeaderboardEntry,
    ) -> Result<Option<leaderboard::Model>> {
        let Some(existing) = Leaderboard::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query leaderboard entry by ID")?
        else {
            return Ok(None);
        };

        let mut active: leaderboard::ActiveModel = existing.into();
        active.user_id = Set(entry.user_id);
        active.score = Set(entry.score);
        active.date_updated = Set(chrono::Utc::now());

        let updated = active
            .update(&self.conn)
            .await
            .with_context(|| format!("Failed to update leaderboard entry {id}"))?;

        Ok(Some(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = Leaderboard::delete_by_id(id)
            .exec(&self.conn)
            .await
            .with_context(|| format!("Failed to delete leaderboard entry {id}"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn clear(&self) -> Result<u64> {
        let result = Leaderboard::delete_many()
            .exec(&self.conn)
            .await
            .context("Failed to clear leaderboard")?;

        Ok(result.rows_affected)
    }

    pub async fn count(&self) -> Result<u64> {
        Leaderboard::find()
            .count(&self.conn)
            .await
            .context("Failed to count leaderboard entries")
    }
}
