//! Command-line interface for the taleweaver binary.

mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{run_health, run_serve, run_story};
