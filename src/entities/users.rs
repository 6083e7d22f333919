use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub username: String,

    pub email: String,

    /// Opaque credential, stored as given and never projected.
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team_members::Entity")]
    Memberships,
    #[sea_orm(has_many = "super::activities::Entity")]
    Activities,
    #[sea_orm(has_many = "super::leaderboard::Entity")]
    LeaderboardEntries,
}

impl Related<super::team_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl Related<super::activities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activities.def()
    }
}

impl Related<super::leaderboard::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaderboardEntries.def()
    }
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        super::team_members::Relation::Team.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::team_members::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
