//! Populate-db command handler

use crate::config::Config;
use crate::db::Store;
use crate::domain::Collection;
use crate::services::{SeedService, SeedSummary};

/// Operator-facing report printed after a successful seed.
#[must_use]
pub fn render_summary(summary: &SeedSummary) -> String {
    let mut out = String::from("Successfully populated the OctoFit database with test data!\n");
    out.push_str("Database summary:\n");
    for collection in Collection::ALL {
        out.push_str(&format!(
            "  - {}: {}\n",
            collection.label(),
            summary.get(collection)
        ));
    }
    out
}

pub async fn cmd_populate_db(config: &Config) -> anyhow::Result<()> {
    let store = Store::single_connection(&config.database).await?;
    let summary = SeedService::new(store).run().await?;

    print!("{}", render_summary(&summary));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_summary() {
        let summary = SeedSummary {
            users: 5,
            teams: 2,
            activities: 5,
            leaderboard: 5,
            workouts: 5,
        };

        let out = render_summary(&summary);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "Successfully populated the OctoFit database with test data!",
                "Database summary:",
                "  - Users: 5",
                "  - Teams: 2",
                "  - Activities: 5",
                "  - Leaderboard entries: 5",
                "  - Workouts: 5",
            ]
        );
    }
}
