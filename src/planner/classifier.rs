//! Change classifier.
//!
//! Buckets resource changes by resource type, and within a type into the
//! created and destroyed sequences. Order within each sequence is the order
//! of appearance in the plan.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::resource::ResourceChange;

/// Created and destroyed records of a single resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeBucket<'a> {
    /// Records the plan creates, in plan order.
    pub created: Vec<&'a ResourceChange>,
    /// Records the plan destroys, in plan order.
    pub destroyed: Vec<&'a ResourceChange>,
}

/// Resource changes grouped by type.
///
/// Iteration over types is lexicographic so output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangesByType<'a> {
    buckets: BTreeMap<&'a str, TypeBucket<'a>>,
}

/// Groups changes by resource type.
///
/// Every input lands in exactly one bucket sequence; an empty type string
/// is a valid key like any other.
#[must_use]
pub fn classify(resources: &[ResourceChange]) -> ChangesByType<'_> {
    let buckets = resources
        .iter()
        .fold(BTreeMap::<&str, TypeBucket<'_>>::new(), |mut acc, change| {
            let bucket = acc.entry(change.resource_type.as_str()).or_default();
            if change.is_destroy {
                bucket.destroyed.push(change);
            } else {
                bucket.created.push(change);
            }
            acc
        });

    ChangesByType { buckets }
}

impl TypeBucket<'_> {
    /// Total number of records in the bucket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.created.len() + self.destroyed.len()
    }

    /// Returns true if the bucket holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.destroyed.is_empty()
    }

    /// Returns true if the bucket has at least one record on each side.
    #[must_use]
    pub fn has_candidates(&self) -> bool {
        !self.created.is_empty() && !self.destroyed.is_empty()
    }
}

impl<'a> ChangesByType<'a> {
    /// Returns the bucket for a resource type.
    #[must_use]
    pub fn get(&self, resource_type: &str) -> Option<&TypeBucket<'a>> {
        self.buckets.get(resource_type)
    }

    /// Returns the resource types present, in iteration order.
    #[must_use]
    pub fn types(&self) -> Vec<&'a str> {
        self.buckets.keys().copied().collect()
    }

    /// Iterates over `(type, bucket)` in lexicographic type order.
    pub fn iter(&self) -> btree_map::Iter<'_, &'a str, TypeBucket<'a>> {
        self.buckets.iter()
    }

    /// Number of distinct resource types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if no changes were classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of records across all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets.values().map(TypeBucket::len).sum()
    }
}

impl<'s, 'a> IntoIterator for &'s ChangesByType<'a> {
    type Item = (&'s &'a str, &'s TypeBucket<'a>);
    type IntoIter = btree_map::Iter<'s, &'a str, TypeBucket<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceAddress;
    use serde_json::Value;

    fn created(addr: &str) -> ResourceChange {
        ResourceChange::created(ResourceAddress::parse(addr).unwrap(), Value::Null)
    }

    fn destroyed(addr: &str) -> ResourceChange {
        ResourceChange::destroyed(ResourceAddress::parse(addr).unwrap(), Value::Null)
    }

    #[test]
    fn test_classify_groups_by_type_and_direction() {
        let changes = vec![
            created("aws_instance.a"),
            destroyed("aws_instance.x"),
            created("local_file.f"),
            created("aws_instance.b"),
            destroyed("aws_instance.y"),
        ];
        let buckets = classify(&changes);

        assert_eq!(buckets.types(), vec!["aws_instance", "local_file"]);
        assert_eq!(buckets.total(), changes.len());

        let instances = buckets.get("aws_instance").unwrap();
        let created: Vec<_> = instances.created.iter().map(|c| c.address.as_str()).collect();
        let destroyed: Vec<_> = instances.destroyed.iter().map(|c| c.address.as_str()).collect();
        assert_eq!(created, vec!["aws_instance.a", "aws_instance.b"]);
        assert_eq!(destroyed, vec!["aws_instance.x", "aws_instance.y"]);

        let files = buckets.get("local_file").unwrap();
        assert_eq!(files.created.len(), 1);
        assert!(files.destroyed.is_empty());
        assert!(!files.has_candidates());
    }

    #[test]
    fn test_classify_counts_match_inputs_per_type() {
        let changes = vec![
            destroyed("b_type.one"),
            created("a_type.one"),
            destroyed("b_type.two"),
            created("b_type.three"),
        ];
        let buckets = classify(&changes);

        for resource_type in buckets.types() {
            let expected = changes
                .iter()
                .filter(|c| c.resource_type == resource_type)
                .count();
            assert_eq!(buckets.get(resource_type).unwrap().len(), expected);
        }
        // Lexicographic, not insertion order.
        assert_eq!(buckets.types(), vec!["a_type", "b_type"]);
    }

    #[test]
    fn test_classify_empty_type_is_a_key() {
        let mut change = created("aws_instance.a");
        change.resource_type = String::new();
        let changes = vec![change];
        let buckets = classify(&changes);

        assert_eq!(buckets.types(), vec![""]);
        assert_eq!(buckets.get("").unwrap().created.len(), 1);
    }

    #[test]
    fn test_classify_empty_input() {
        let buckets = classify(&[]);
        assert!(buckets.is_empty());
        assert_eq!(buckets.total(), 0);
    }
}
