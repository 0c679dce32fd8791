//! Command-line interface module.

mod batch;
mod commands;
mod diagnose;
mod generate;
mod session;

pub use batch::run_batch;
pub use commands::{Cli, Commands};
pub use diagnose::run_diagnose;
pub use generate::run_generate;
