//! Plan reader turning a JSON plan into resource change records.

use std::path::Path;
use tracing::{debug, info};

use crate::error::{PlanReadError, Result};
use crate::resource::{ResourceAddress, ResourceChange};

use super::types::{JsonPlan, JsonResourceChange, PlannedAction};

/// Magic bytes of a zip archive, the container of Terraform's binary plans.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Reader for Terraform JSON plans.
#[derive(Debug, Default)]
pub struct PlanReader;

impl PlanReader {
    /// Creates a new plan reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads resource changes from a JSON plan file.
    ///
    /// # Errors
    ///
    /// Returns [`PlanReadError`] if the file is missing, unreadable, or not a
    /// JSON plan.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Vec<ResourceChange>> {
        let path = path.as_ref();
        info!("Reading plan from: {}", path.display());

        if !path.exists() {
            return Err(PlanReadError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = std::fs::read(path).map_err(|source| PlanReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse_slice(&content, Some(path))
    }

    /// Parses resource changes from a JSON plan string.
    ///
    /// # Errors
    ///
    /// Returns [`PlanReadError`] if the content is not a JSON plan or holds
    /// an invalid address.
    pub fn parse_json(&self, content: &str, source: Option<&Path>) -> Result<Vec<ResourceChange>> {
        self.parse_slice(content.as_bytes(), source)
    }

    fn parse_slice(&self, content: &[u8], source: Option<&Path>) -> Result<Vec<ResourceChange>> {
        let location = source.map(|p| p.display().to_string());

        if content.starts_with(ZIP_MAGIC) {
            return Err(PlanReadError::decode(
                "this is a binary plan; convert it with `terraform show -json <planfile>`",
                location,
            )
            .into());
        }

        let plan: JsonPlan = serde_json::from_slice(content)
            .map_err(|e| PlanReadError::decode(format!("JSON parse error: {e}"), location))?;

        debug!(
            "Decoded plan (format {}, terraform {}) with {} resource changes",
            plan.format_version.as_deref().unwrap_or("unknown"),
            plan.terraform_version.as_deref().unwrap_or("unknown"),
            plan.resource_changes.len()
        );

        let mut changes = Vec::new();
        for raw in plan.resource_changes {
            if let Some(change) = self.convert(raw)? {
                changes.push(change);
            }
        }

        info!("Plan has {} create/destroy candidates", changes.len());
        Ok(changes)
    }

    /// Converts one raw entry, skipping anything that is not a plain
    /// create or delete of a managed resource.
    fn convert(&self, raw: JsonResourceChange) -> Result<Option<ResourceChange>> {
        if raw.mode.as_deref() == Some("data") {
            debug!("Skipping data source {}", raw.address);
            return Ok(None);
        }

        // Deposed objects share the current instance's address and cannot be
        // targeted by `terraform state mv`.
        if let Some(key) = &raw.deposed {
            debug!("Skipping deposed object {} of {}", key, raw.address);
            return Ok(None);
        }

        let action = raw.change.planned_action();
        match action {
            PlannedAction::Create | PlannedAction::Delete => {}
            PlannedAction::Replace => {
                debug!("Skipping replacement of {}, it keeps its address", raw.address);
                return Ok(None);
            }
            PlannedAction::Other => {
                debug!(
                    "Skipping {} with actions {:?}",
                    raw.address, raw.change.actions
                );
                return Ok(None);
            }
        }

        let address = ResourceAddress::parse(&raw.address)?;
        if raw.module_address.as_deref() != address.module() {
            debug!(
                "Module address {:?} disagrees with parsed module {:?} for {}",
                raw.module_address,
                address.module(),
                raw.address
            );
        }

        let is_destroy = action == PlannedAction::Delete;
        let mut change = if is_destroy {
            ResourceChange::destroyed(address, raw.change.before)
        } else {
            ResourceChange::created(address, raw.change.after)
        };
        // The record's own fields are authoritative over the parsed address.
        change.resource_type = raw.resource_type;
        change.name = raw.name;

        debug!("Found {} {}", change.kind(), change.address);
        Ok(Some(change))
    }
}
