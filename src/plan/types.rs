//! Serde types for Terraform's JSON plan representation.
//!
//! Only the fields needed for move inference are modelled; everything else
//! in the document is ignored.

use serde::Deserialize;
use serde_json::Value;

/// Top level of `terraform show -json <planfile>`.
#[derive(Debug, Deserialize)]
pub struct JsonPlan {
    /// Plan format version, e.g. `"1.2"`.
    #[serde(default)]
    pub format_version: Option<String>,
    /// Terraform version that produced the plan.
    #[serde(default)]
    pub terraform_version: Option<String>,
    /// Planned changes, in plan order.
    #[serde(default)]
    pub resource_changes: Vec<JsonResourceChange>,
}

/// One entry of `resource_changes`.
#[derive(Debug, Deserialize)]
pub struct JsonResourceChange {
    /// Full instance address.
    pub address: String,
    /// Module path, absent for root resources.
    #[serde(default)]
    pub module_address: Option<String>,
    /// `managed` or `data`.
    #[serde(default)]
    pub mode: Option<String>,
    /// Resource type.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Resource name.
    pub name: String,
    /// Key of a deposed object, set when the entry is not the current instance.
    #[serde(default)]
    pub deposed: Option<String>,
    /// The change itself.
    pub change: JsonChange,
}

/// The `change` object of a resource change.
#[derive(Debug, Deserialize)]
pub struct JsonChange {
    /// Planned actions, e.g. `["create"]` or `["delete", "create"]`.
    pub actions: Vec<String>,
    /// Attributes before the change.
    #[serde(default)]
    pub before: Value,
    /// Attributes after the change.
    #[serde(default)]
    pub after: Value,
}

/// What a list of planned actions amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAction {
    /// Plain creation.
    Create,
    /// Plain destruction.
    Delete,
    /// Destroy-and-recreate at the same address.
    Replace,
    /// No-op, read, update, forget, or anything unrecognised.
    Other,
}

impl JsonChange {
    /// Classifies the action list.
    #[must_use]
    pub fn planned_action(&self) -> PlannedAction {
        match self.actions.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            ["create"] => PlannedAction::Create,
            ["delete"] => PlannedAction::Delete,
            ["delete", "create"] | ["create", "delete"] => PlannedAction::Replace,
            _ => PlannedAction::Other,
        }
    }
}
