//! CLI module for tfmv.
//!
//! This module provides the command-line interface and output formatting.

mod commands;
mod output;

pub use commands::{Cli, OutputFormat};
pub use output::OutputFormatter;
