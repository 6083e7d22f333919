use sea_orm_migration::prelude::*;

mod m20250601_initial;
mod m20250608_leaderboard_score_index;
mod m20250609_activities_user_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_initial::Migration),
            Box::new(m20250608_leaderboard_score_index::Migration),
            Box::new(m20250609_activities_user_index::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_order() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "m20250601_initial",
                "m20250608_leaderboard_score_index",
                "m20250609_activities_user_index",
            ]
        );
    }
}
