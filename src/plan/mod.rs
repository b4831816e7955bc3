//! Plan decoding.
//!
//! Reads the machine-readable plan produced by `terraform show -json` and
//! yields the resource changes that are candidates for a state move.

mod reader;
mod types;

pub use reader::PlanReader;
pub use types::{JsonChange, JsonPlan, JsonResourceChange, PlannedAction};
