pub mod cli;
pub mod config;
pub mod fade;
pub mod runtime;
pub mod schedule;
pub mod transition;
