//! Command-line interface for `OctoFit`.

pub mod commands;

use clap::{Parser, Subcommand};

/// `OctoFit` Tracker - fitness activity, team and leaderboard service
#[derive(Parser)]
#[command(name = "octofit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP API until Ctrl+C (default)
    #[command(alias = "server")]
    Serve,

    /// Drop every collection and load the fixed test dataset
    #[command(name = "populate-db", alias = "populate_db", alias = "seed")]
    PopulateDb,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

impl Cli {
    /// Subcommand to run, falling back to `serve`.
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_serves() {
        let cli = Cli::try_parse_from(["octofit"]).unwrap();
        assert_eq!(cli.command(), Commands::Serve);
    }

    #[test]
    fn test_populate_db_takes_no_flags() {
        let cli = Cli::try_parse_from(["octofit", "populate-db"]).unwrap();
        assert_eq!(cli.command(), Commands::PopulateDb);

        assert!(Cli::try_parse_from(["octofit", "populate-db", "--force"]).is_err());
    }

    #[test]
    fn test_aliases() {
        let cli = Cli::try_parse_from(["octofit", "seed"]).unwrap();
        assert_eq!(cli.command(), Commands::PopulateDb);

        let cli = Cli::try_parse_from(["octofit", "server"]).unwrap();
        assert_eq!(cli.command(), Commands::Serve);
    }
}
