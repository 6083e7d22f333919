use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, sea_query::OnConflict,
};
use uuid::Uuid;

use crate::entities::{prelude::*, team_members, teams, users};
use crate::models::{NewTeam, TeamWithMembers};

pub struct TeamRepository {
    conn: DatabaseConnection,
}

impl TeamRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn build(team: NewTeam) -> teams::Model {
        teams::Model {
            id: Uuid::new_v4(),
            name: team.name,
        }
    }

    fn to_active(model: &teams::Model) -> teams::ActiveModel {
        teams::ActiveModel {
            id: Set(model.id),
            name: Set(model.name.clone()),
        }
    }

    fn sorted(mut members: Vec<users::Model>) -> Vec<users::Model> {
        members.sort_by(|a, b| a.username.cmp(&b.username));
        members
    }

    pub async fn create(&self, team: NewTeam) -> Result<teams::Model> {
        let model = Self::build(team);
        Self::to_active(&model)
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to create team '{}'", model.name))
    }

    pub async fn insert_many(&self, teams: Vec<NewTeam>) -> Result<Vec<teams::Model>> {
        let models: Vec<teams::Model> = teams.into_iter().map(Self::build).collect();
        if models.is_empty() {
            return Ok(models);
        }

        Teams::insert_many(models.iter().map(Self::to_active))
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to bulk insert teams")?;

        Ok(models)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<teams::Model>> {
        Teams::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query team by ID")
    }

    pub async fn get_with_members(&self, id: Uuid) -> Result<Option<TeamWithMembers>> {
        let Some(team) = self.get(id).await? else {
            return Ok(None);
        };

        let members = team
            .find_related(Users)
            .all(&self.conn)
            .await
            .with_context(|| format!("Failed to load members of team {id}"))?;

        Ok(Some(TeamWithMembers {
            team,
            members: Self::sorted(members),
        }))
    }

    pub async fn list_with_members(&self) -> Result<Vec<TeamWithMembers>> {
        let teams = Teams::find()
            .order_by_asc(teams::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list teams")?;

        let members = teams
            .load_many_to_many(Users, TeamMembers, &self.conn)
            .await
            .context("Failed to load team members")?;

        Ok(teams
            .into_iter()
            .zip(members)
            .map(|(team, members)| TeamWithMembers {
                team,
                members: Self::sorted(members),
            })
            .collect())
    }

    pub async fn members_of(&self, team_id: Uuid) -> Result<Vec<users::Model>> {
        let members = Users::find()
            .inner_join(TeamMembers)
            .filter(team_members::Column::TeamId.eq(team_id))
            .all(&self.conn)
            .await
            .with_context(|| format!("Failed to load members of team {team_id}"))?;

        Ok(Self::sorted(members))
    }

    /// Adds `user_id` to the team. Returns `false` when it was already a member.
    pub async fn add_member(&self, team_id: Uuid, user_id: Uuid) -> Result<bool> {
        let membership = team_members::ActiveModel {
            team_id: Set(team_id),
            user_id: Set(user_id),
        };

        let inserted = TeamMembers::insert(membership)
            .on_conflict(
                OnConflict::columns([team_members::Column::TeamId, team_members::Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .with_context(|| format!("Failed to add user {user_id} to team {team_id}"))?;

        Ok(inserted > 0)
    }

    pub async fn rename(&self, id: Uuid, name: String) -> Result<Option<teams::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: teams::ActiveModel = existing.into();
        active.name = Set(name);

        let updated = active
            .update(&self.conn)
            .await
            .with_context(|| format!("Failed to update team {id}"))?;

        Ok(Some(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = Teams::delete_by_id(id)
            .exec(&self.conn)
            .await
            .with_context(|| format!("Failed to delete team {id}"))?;

        Ok(result.rows_affected > 0)
    }

    /// Removes every team along with all memberships.
    pub async fn clear(&self) -> Result<u64> {
        TeamMembers::delete_many()
            .exec(&self.conn)
            .await
            .context("Failed to clear team memberships")?;

        let result = Teams::delete_many()
            .exec(&self.conn)
            .await
            .context("Failed to clear teams")?;

        Ok(result.rows_affected)
    }

    pub async fn count(&self) -> Result<u64> {
        Teams::find()
            .count(&self.conn)
            .await
            .context("Failed to count teams")
    }
}
