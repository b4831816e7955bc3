//! Move inference.
//!
//! Classifies the plan's creations and destructions by type, pairs them,
//! checks each pair and renders the surviving moves.

mod classifier;
mod emitter;
mod matcher;
mod validator;

pub use crate::config::{MatchStrategy, ReusePolicy};

pub use classifier::{ChangesByType, TypeBucket, classify};
pub use emitter::{MoveStatement, STATE_MV_COMMAND, emit};
pub use matcher::{CandidatePair, Matcher};
pub use validator::{MovePair, Validator, ensure_distinct};
