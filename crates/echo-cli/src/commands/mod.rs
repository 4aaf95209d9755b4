//! CLI subcommand implementations.

pub mod catalog;
pub mod merge;
pub mod notes;
pub mod slots;
pub mod status;
pub mod tasks;
pub mod util;
