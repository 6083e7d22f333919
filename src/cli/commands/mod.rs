mod init;
mod populate_db;
mod serve;

pub use init::cmd_init;
pub use populate_db::{cmd_populate_db, render_summary};
pub use serve::cmd_serve;
