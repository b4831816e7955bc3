//! Typed model of the resources a plan touches.
//!
//! Addresses and change records are built once from a decoded plan and are
//! read-only afterwards.

mod address;
mod change;

pub use address::{InstanceKey, ResourceAddress, ResourceMode};
pub use change::{AttributeDiff, ChangeKind, ResourceChange};
