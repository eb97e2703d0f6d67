//! Command line front end: comparison tables, fleet totals and garage upkeep.

pub mod args;
pub mod commands;
pub mod output;
pub mod table;

pub use commands::{run, usage};
