//! Configuration specification types.
//!
//! This module defines the structs that map to the optional `.tfmv.yaml`
//! file. Every field has a default, so an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

/// Default plan file, as produced by `terraform show -json tfplan > tfplan.json`.
pub const DEFAULT_PLAN_FILE: &str = "tfplan.json";

/// Settings for one move-inference run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MoveConfig {
    /// Path to the JSON plan.
    #[serde(default = "default_plan_file")]
    pub plan_file: PathBuf,
    /// How created and destroyed resources are paired.
    #[serde(default)]
    pub strategy: MatchStrategy,
    /// Whether a destroyed resource may be paired more than once.
    #[serde(default)]
    pub reuse: ReusePolicy,
    /// Shell-quote addresses in rendered commands.
    #[serde(default)]
    pub quote: bool,
}

/// Strategy for pairing created resources with destroyed ones.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// Pair the i-th creation with the i-th destruction of each type.
    ///
    /// Best-effort only: it assumes the plan lists both sides in
    /// corresponding order.
    Positional,
    /// Pair resources whose name components are equal.
    #[default]
    SameName,
}

/// Whether a destroyed resource stays available after being matched.
///
/// Only affects [`MatchStrategy::SameName`]; positional pairing is always
/// one-to-one.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReusePolicy {
    /// A matched destroyed resource is not offered to later creations.
    #[default]
    ConsumeOnMatch,
    /// A destroyed resource may be proposed as the origin of several
    /// created resources.
    AllowReuse,
}

fn default_plan_file() -> PathBuf {
    PathBuf::from(DEFAULT_PLAN_FILE)
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            plan_file: default_plan_file(),
            strategy: MatchStrategy::default(),
            reuse: ReusePolicy::default(),
            quote: false,
        }
    }
}

impl MatchStrategy {
    /// Returns the setting's canonical spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positional => "positional",
            Self::SameName => "same-name",
        }
    }
}

impl ReusePolicy {
    /// Returns the setting's canonical spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConsumeOnMatch => "consume-on-match",
            Self::AllowReuse => "allow-reuse",
        }
    }
}

impl FromStr for MatchStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positional" => Ok(Self::Positional),
            "same-name" | "same_name" => Ok(Self::SameName),
            _ => Err(ConfigError::invalid_value(
                "strategy",
                s,
                "positional, same-name",
            )),
        }
    }
}

impl FromStr for ReusePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consume-on-match" | "consume_on_match" => Ok(Self::ConsumeOnMatch),
            "allow-reuse" | "allow_reuse" => Ok(Self::AllowReuse),
            _ => Err(ConfigError::invalid_value(
                "reuse",
                s,
                "consume-on-match, allow-reuse",
            )),
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ReusePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
