//! Configuration module for tfmv.
//!
//! This module handles all configuration-related functionality:
//! - Parsing and deserializing the optional `.tfmv.yaml`
//! - Environment variable overrides and `.env` loading
//! - The matching strategy and reuse policy settings

mod parser;
mod spec;

pub use parser::{
    ConfigParser, DEFAULT_CONFIG_FILES, ENV_PLAN_FILE, ENV_REUSE, ENV_STRATEGY, find_config_file,
};
pub use spec::{DEFAULT_PLAN_FILE, MatchStrategy, MoveConfig, ReusePolicy};
