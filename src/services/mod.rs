pub mod seed;
pub mod seed_data;

pub use seed::{SeedError, SeedService, SeedSummary};
