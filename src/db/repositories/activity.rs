use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{activities, prelude::*, users};
use crate::models::{ActivityWithUser, NewActivity};

pub struct ActivityRepository {
    conn: DatabaseConnection,
}

impl ActivityRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn check_duration(duration_seconds: i64) -> Result<i64> {
        if duration_seconds < 0 {
            anyhow::bail!("Activity duration cannot be negative ({duration_seconds}s)");
        }
        Ok(duration_seconds)
    }

    fn build(activity: NewActivity) -> Result<activities::Model> {
        Ok(activities::Model {
            id: Uuid::new_v4(),
            user_id: activity.user_id,
            duration_seconds: Self::check_duration(activity.duration_seconds)?,
            activity_type: activity.activity_type,
            date_created: chrono::Utc::now(),
        })
    }

    fn to_active(model: &activities::Model) -> activities::ActiveModel {
        activities::ActiveModel {
            id: Set(model.id),
            user_id: Set(model.user_id),
            activity_type: Set(model.activity_type.clone()),
            duration_seconds: Set(model.duration_seconds),
            date_created: Set(model.date_created),
        }
    }

    fn join(
        (activity, user): (activities::Model, Option<users::Model>),
    ) -> Result<ActivityWithUser> {
        let user = user.ok_or_else(|| {
            anyhow::anyhow!(
                "Activity {} references missing user {}",
                activity.id,
                activity.user_id
            )
        })?;

        Ok(ActivityWithUser { activity, user })
    }

    pub async fn create(&self, activity: NewActivity) -> Result<activities::Model> {
        let model = Self::build(activity)?;
        Self::to_active(&model)
            .insert(&self.conn)
            .await
            .context("Failed to create activity")
    }

    pub async fn insert_many(
        &self,
        activities: Vec<NewActivity>,
    ) -> Result<Vec<activities::Model>> {
        let models = activities
            .into_iter()
            .map(Self::build)
            .collect::<Result<Vec<_>>>()?;
        if models.is_empty() {
            return Ok(models);
        }

        Activities::insert_many(models.iter().map(Self::to_active))
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to bulk insert activities")?;

        Ok(models)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<ActivityWithUser>> {
        let row = Activities::find_by_id(id)
            .find_also_related(Users)
            .one(&self.conn)
            .await
            .context("Failed to query activity by ID")?;

        row.map(Self::join).transpose()
    }

    pub async fn list(&self) -> Result<Vec<ActivityWithUser>> {
        Activities::find()
            .find_also_related(Users)
            .order_by_desc(activities::Column::DateCreated)
            .all(&self.conn)
            .await
            .context("Failed to list activities")?
            .into_iter()
            .map(Self::join)
            .collect()
    }

    /// Replaces the mutable fields. `date_created` is left untouched.
    pub async fn update(
        &self,
        id: Uuid,
        activity: NewActivity,
    ) -> Result<Option<activities::Model>> {
        let Some(existing) = Activities::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query activity by ID")?
        else {
            return Ok(None);
        };

        let mut active: activities::ActiveModel = existing.into();
        active.user_id = Set(activity.user_id);
        active.activity_type = Set(activity.activity_type);
        active.duration_seconds = Set(Self::check_duration(activity.duration_seconds)?);

        let updated = active
            .update(&self.conn)
            .await
            .with_context(|| format!("Failed to update activity {id}"))?;

        Ok(Some(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = Activities::delete_by_id(id)
            .exec(&self.conn)
            .await
            .with_context(|| format!("Failed to delete activity {id}"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn clear(&self) -> Result<u64> {
        let result = Activities::delete_many()
            .exec(&self.conn)
            .await
            .context("Failed to clear activities")?;

        Ok(result.rows_affected)
    }

    pub async fn count(&self) -> Result<u64> {
        Activities::find()
            .count(&self.conn)
            .await
            .context("Failed to count activities")
    }
}
