//! Subcommand implementations.

pub mod doctor;
pub mod run;
