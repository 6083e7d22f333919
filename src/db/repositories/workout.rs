use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{prelude::*, workouts};
use crate::models::NewWorkout;

pub struct WorkoutRepository {
    conn: DatabaseConnection,
}

impl WorkoutRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn build(workout: NewWorkout) -> workouts::Model {
        workouts::Model {
            id: Uuid::new_v4(),
            name: workout.name,
            description: workout.description,
            difficulty_level: workout.difficulty_level,
            date_created: chrono::Utc::now(),
        }
    }

    fn to_active(model: &workouts::Model) -> workouts::ActiveModel {
        workouts::ActiveModel {
            id: Set(model.id),
            name: Set(model.name.clone()),
            description: Set(model.description.clone()),
            difficulty_level: Set(model.difficulty_level),
            date_created: Set(model.date_created),
        }
    }

    pub async fn create(&self, workout: NewWorkout) -> Result<workouts::Model> {
        let model = Self::build(workout);
        Self::to_active(&model)
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to create workout '{}'", model.name))
    }

    pub async fn insert_many(&self, workouts: Vec<NewWorkout>) -> Result<Vec<workouts::Model>> {
        let models: Vec<workouts::Model> = workouts.into_iter().map(Self::build).collect();
        if models.is_empty() {
            return Ok(models);
        }

        Workouts::insert_many(models.iter().map(Self::to_active))
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to bulk insert workouts")?;

        Ok(models)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<workouts::Model>> {
        Workouts::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query workout by ID")
    }

    pub async fn list(&self) -> Result<Vec<workouts::Model>> {
        Workouts::find()
            .order_by_asc(workouts::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list workouts")
    }

    /// Replaces the mutable fields. `date_created` is left untouched.
    pub async fn update(&self, id: Uuid, workout: NewWorkout) -> Result<Option<workouts::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: workouts::ActiveModel = existing.into();
        active.name = Set(workout.name);
        active.description = Set(workout.description);
        active.difficulty_level = Set(workout.difficulty_level);

        let updated = active
            .update(&self.conn)
            .await
            .with_context(|| format!("Failed to update workout {id}"))?;

        Ok(Some(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = Workouts::delete_by_id(id)
            .exec(&self.conn)
            .await
            .with_context(|| format!("Failed to delete workout {id}"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn clear(&self) -> Result<u64> {
        let result = Workouts::delete_many()
            .exec(&self.conn)
            .await
            .context("Failed to clear workouts")?;

        Ok(result.rows_affected)
    }

    pub async fn count(&self) -> Result<u64> {
        Workouts::find()
            .count(&self.conn)
            .await
            .context("Failed to count workouts")
    }
}
