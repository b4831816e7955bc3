//! Error types for tfmv.
//!
//! This module provides the error hierarchy for every stage of a run:
//! configuration, plan decoding, and move inference.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tfmv.
#[derive(Debug, Error)]
pub enum TfmvError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The plan could not be read or decoded.
    #[error("Plan read error: {0}")]
    PlanRead(#[from] PlanReadError),

    /// A candidate move failed a sanity check.
    #[error("Move inference error: {0}")]
    Move(#[from] MoveError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// A setting carried a value outside its allowed set.
    #[error("Invalid value '{value}' for {setting}: expected one of {expected}")]
    InvalidValue {
        /// Name of the setting.
        setting: String,
        /// The rejected value.
        value: String,
        /// Human-readable list of accepted values.
        expected: String,
    },
}

/// Errors raised while reading a plan.
#[derive(Debug, Error)]
pub enum PlanReadError {
    /// The plan file does not exist.
    #[error("Plan file not found: {path}")]
    NotFound {
        /// Path to the missing plan.
        path: PathBuf,
    },

    /// The plan file exists but could not be read.
    #[error("Failed to read plan {path}: {source}")]
    Io {
        /// Path to the plan.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The plan content is not a valid JSON plan.
    #[error("Failed to decode plan{}: {message}", render_location(.location.as_deref()))]
    Decode {
        /// Description of the decode error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// A resource address could not be parsed.
    #[error("Invalid resource address '{address}': {reason}")]
    InvalidAddress {
        /// The offending address.
        address: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Sanity-check failures for candidate moves.
///
/// Both variants abort the whole run: a single implausible pair means the
/// matching heuristic cannot be trusted for any other pair in the same plan.
#[derive(Debug, Error)]
pub enum MoveError {
    /// Source and destination are the same address.
    #[error("Addresses match, which they shouldn't: {address}")]
    AddressCollision {
        /// The shared address.
        address: String,
    },

    /// Created and destroyed records are structurally identical.
    #[error("Resource changes match, which they shouldn't:\ncreation: {creation}\ndeletion: {deletion}")]
    DiffCollision {
        /// Rendered created record.
        creation: String,
        /// Rendered destroyed record.
        deletion: String,
    },
}

fn render_location(location: Option<&str>) -> String {
    location.map(|l| format!(" {l}")).unwrap_or_default()
}

/// Result type alias for tfmv operations.
pub type Result<T> = std::result::Result<T, TfmvError>;

impl TfmvError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this error came from a move sanity check.
    #[must_use]
    pub const fn is_fatal_collision(&self) -> bool {
        matches!(
            self,
            Self::Move(MoveError::AddressCollision { .. } | MoveError::DiffCollision { .. })
        )
    }
}

impl ConfigError {
    /// Creates an invalid-value error.
    #[must_use]
    pub fn invalid_value(
        setting: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            setting: setting.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

impl PlanReadError {
    /// Creates a decode error with an optional location.
    #[must_use]
    pub fn decode(message: impl Into<String>, location: Option<String>) -> Self {
        Self::Decode {
            message: message.into(),
            location,
        }
    }

    /// Creates an invalid-address error.
    #[must_use]
    pub fn invalid_address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }
}
