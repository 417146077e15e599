//! CLI command handlers.

mod bake;

pub use bake::run_bake_command;
