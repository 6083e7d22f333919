use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{prelude::*, users};
use crate::models::NewUser;

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn build(user: NewUser) -> users::Model {
        users::Model {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password: user.password,
        }
    }

    fn to_active(model: &users::Model) -> users::ActiveModel {
        users::ActiveModel {
            id: Set(model.id),
            username: Set(model.username.clone()),
            email: Set(model.email.clone()),
            password: Set(model.password.clone()),
        }
    }

    pub async fn create(&self, user: NewUser) -> Result<users::Model> {
        let model = Self::build(user);
        Self::to_active(&model)
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to create user '{}'", model.username))
    }

    /// Inserts all users in a single statement.
    pub async fn insert_many(&self, users: Vec<NewUser>) -> Result<Vec<users::Model>> {
        let models: Vec<users::Model> = users.into_iter().map(Self::build).collect();
        if models.is_empty() {
            return Ok(models);
        }

        Users::insert_many(models.iter().map(Self::to_active))
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to bulk insert users")?;

        Ok(models)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<users::Model>> {
        Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")
    }

    pub async fn list(&self) -> Result<Vec<users::Model>> {
        Users::find()
            .order_by_asc(users::Column::Username)
            .all(&self.conn)
            .await
            .context("Failed to list users")
    }

    pub async fn update(&self, id: Uuid, user: NewUser) -> Result<Option<users::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = existing.into();
        active.username = Set(user.username);
        active.email = Set(user.email);
        active.password = Set(user.password);

        let updated = active
            .update(&self.conn)
            .await
            .with_context(|| format!("Failed to update user {id}"))?;

        Ok(Some(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.conn)
            .await
            .with_context(|| format!("Failed to delete user {id}"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn clear(&self) -> Result<u64> {
        let result = Users::delete_many()
            .exec(&self.conn)
            .await
            .context("Failed to clear users")?;

        Ok(result.rows_affected)
    }

    pub async fn count(&self) -> Result<u64> {
        Users::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")
    }
}
