//! Resource change records.
//!
//! A [`ResourceChange`] is one resource that the plan either creates or
//! destroys, together with its attribute-level diff.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::address::ResourceAddress;

/// Attribute-level diff of a resource change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeDiff {
    /// Attributes before the change (`null` for creations).
    pub before: Value,
    /// Attributes after the change (`null` for destructions).
    pub after: Value,
}

/// Direction of a resource change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The plan creates the resource.
    Create,
    /// The plan destroys the resource.
    Destroy,
}

/// A single created or destroyed resource in a plan.
#[derive(Debug, Clone)]
pub struct ResourceChange {
    /// Instance address.
    pub address: ResourceAddress,
    /// Resource type, used as the grouping key.
    pub resource_type: String,
    /// Name component used by same-name matching.
    pub name: String,
    /// True when the plan destroys this resource.
    pub is_destroy: bool,
    /// Attribute diff payload.
    pub diff: AttributeDiff,
}

impl ResourceChange {
    /// Creates a record for a resource the plan creates.
    ///
    /// Type and name are taken from the address.
    #[must_use]
    pub fn created(address: ResourceAddress, after: Value) -> Self {
        Self::from_address(
            address,
            false,
            AttributeDiff {
                before: Value::Null,
                after,
            },
        )
    }

    /// Creates a record for a resource the plan destroys.
    #[must_use]
    pub fn destroyed(address: ResourceAddress, before: Value) -> Self {
        Self::from_address(
            address,
            true,
            AttributeDiff {
                before,
                after: Value::Null,
            },
        )
    }

    fn from_address(address: ResourceAddress, is_destroy: bool, diff: AttributeDiff) -> Self {
        Self {
            resource_type: address.resource_type().to_string(),
            name: address.name().to_string(),
            address,
            is_destroy,
            diff,
        }
    }

    /// Returns the change direction.
    #[must_use]
    pub const fn kind(&self) -> ChangeKind {
        if self.is_destroy {
            ChangeKind::Destroy
        } else {
            ChangeKind::Create
        }
    }
}

// Structural equality over address, type and diff. The destroy flag is not
// compared since it always differs between the two sides of a pair.
impl PartialEq for ResourceChange {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
            && self.resource_type == other.resource_type
            && self.diff == other.diff
    }
}

impl Eq for ResourceChange {}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::Destroy => "destroy",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for ResourceChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, type={}, name={}) before={} after={}",
            self.address,
            self.kind(),
            self.resource_type,
            self.name,
            self.diff.before,
            self.diff.after
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn addr(s: &str) -> ResourceAddress {
        ResourceAddress::parse(s).unwrap()
    }

    #[test]
    fn test_created_derives_type_and_name() {
        let change = ResourceChange::created(addr("module.a.aws_instance.web[1]"), json!({}));
        assert_eq!(change.resource_type, "aws_instance");
        assert_eq!(change.name, "web");
        assert_eq!(change.kind(), ChangeKind::Create);
        assert_eq!(change.diff.before, Value::Null);
    }

    #[test]
    fn test_equality_ignores_destroy_flag() {
        let mut a = ResourceChange::created(addr("aws_instance.web"), Value::Null);
        let b = ResourceChange::destroyed(addr("aws_instance.web"), Value::Null);
        assert_eq!(a, b);

        a.diff.after = json!({"ami": "ami-123"});
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_compares_address() {
        let a = ResourceChange::created(addr("aws_instance.old"), json!({"ami": "x"}));
        let b = ResourceChange::created(addr("aws_instance.new"), json!({"ami": "x"}));
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_renders_diff() {
        let change = ResourceChange::destroyed(addr("aws_s3_bucket.logs"), json!({"bucket": "l"}));
        assert_eq!(
            change.to_string(),
            r#"aws_s3_bucket.logs (destroy, type=aws_s3_bucket, name=logs) before={"bucket":"l"} after=null"#
        );
    }
}
