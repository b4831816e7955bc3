//! Matcher pairing created records with destroyed records.
//!
//! Pairs are only ever formed inside one type bucket. Buckets are visited in
//! the classifier's type order and pairs within a bucket are produced in
//! created-sequence order, so the output order is deterministic.

use tracing::{debug, warn};

use crate::config::{MatchStrategy, ReusePolicy};
use crate::resource::ResourceChange;

use super::classifier::{ChangesByType, TypeBucket};

/// A proposed move: one created and one destroyed record of the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidatePair<'a> {
    /// The record at the new address.
    pub created: &'a ResourceChange,
    /// The record at the old address.
    pub destroyed: &'a ResourceChange,
}

/// Pairs created and destroyed records under a [`MatchStrategy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    strategy: MatchStrategy,
    reuse: ReusePolicy,
}

impl Matcher {
    /// Creates a matcher for the given strategy with consume-on-match reuse.
    #[must_use]
    pub const fn new(strategy: MatchStrategy) -> Self {
        Self {
            strategy,
            reuse: ReusePolicy::ConsumeOnMatch,
        }
    }

    /// Sets the reuse policy for same-name matching.
    #[must_use]
    pub const fn with_reuse(mut self, reuse: ReusePolicy) -> Self {
        self.reuse = reuse;
        self
    }

    /// Returns the configured strategy.
    #[must_use]
    pub const fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Returns the configured reuse policy.
    #[must_use]
    pub const fn reuse(&self) -> ReusePolicy {
        self.reuse
    }

    /// Pairs records across all buckets.
    #[must_use]
    pub fn match_changes<'a>(&self, buckets: &ChangesByType<'a>) -> Vec<CandidatePair<'a>> {
        buckets
            .iter()
            .flat_map(|(resource_type, bucket)| {
                let pairs = self.match_bucket(bucket);
                debug!(
                    "{resource_type}: {} created, {} destroyed, {} paired",
                    bucket.created.len(),
                    bucket.destroyed.len(),
                    pairs.len()
                );
                pairs
            })
            .collect()
    }

    /// Pairs records within a single bucket.
    #[must_use]
    pub fn match_bucket<'a>(&self, bucket: &TypeBucket<'a>) -> Vec<CandidatePair<'a>> {
        match self.strategy {
            MatchStrategy::Positional => Self::match_positional(bucket),
            MatchStrategy::SameName => self.match_same_name(bucket),
        }
    }

    /// Pairs the i-th created record with the i-th destroyed record.
    ///
    /// Entries beyond the shorter sequence stay unpaired.
    fn match_positional<'a>(bucket: &TypeBucket<'a>) -> Vec<CandidatePair<'a>> {
        bucket
            .created
            .iter()
            .copied()
            .zip(bucket.destroyed.iter().copied())
            .map(|(created, destroyed)| CandidatePair {
                created,
                destroyed,
            })
            .collect()
    }

    /// Pairs each created record with the first destroyed record of the
    /// same name that is still available.
    fn match_same_name<'a>(&self, bucket: &TypeBucket<'a>) -> Vec<CandidatePair<'a>> {
        let mut uses = vec![0_usize; bucket.destroyed.len()];
        let mut pairs = Vec::new();

        for &created in &bucket.created {
            let found = bucket.destroyed.iter().copied().enumerate().find(|(i, destroyed)| {
                destroyed.name == created.name
                    && (self.reuse == ReusePolicy::AllowReuse || uses[*i] == 0)
            });

            match found {
                Some((i, destroyed)) => {
                    uses[i] += 1;
                    if uses[i] > 1 {
                        warn!(
                            "{} is proposed as the origin of more than one resource (now {})",
                            destroyed.address, created.address
                        );
                    }
                    pairs.push(CandidatePair {
                        created,
                        destroyed,
                    });
                }
                None => debug!(
                    "No destroyed resource named '{}' for {}",
                    created.name, created.address
                ),
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::classify;
    use crate::resource::ResourceAddress;
    use serde_json::json;

    fn created(addr: &str) -> ResourceChange {
        ResourceChange::created(ResourceAddress::parse(addr).unwrap(), json!({"addr": addr}))
    }

    fn destroyed(addr: &str) -> ResourceChange {
        ResourceChange::destroyed(ResourceAddress::parse(addr).unwrap(), json!({"addr": addr}))
    }

    fn addresses(pairs: &[CandidatePair<'_>]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|p| (p.created.address.to_string(), p.destroyed.address.to_string()))
            .collect()
    }

    #[test]
    fn test_positional_pairs_by_index() {
        let changes = vec![
            created("aws_instance.a"),
            created("aws_instance.b"),
            destroyed("aws_instance.x"),
        ];
        let buckets = classify(&changes);
        let pairs = Matcher::new(MatchStrategy::Positional).match_changes(&buckets);

        assert_eq!(
            addresses(&pairs),
            vec![(String::from("aws_instance.a"), String::from("aws_instance.x"))]
        );
    }

    #[test]
    fn test_positional_produces_min_pairs() {
        for (m, n) in [(0_usize, 3_usize), (3, 0), (2, 2), (4, 1), (1, 4)] {
            let mut changes = Vec::new();
            for i in 0..m {
                changes.push(created(&format!("null_resource.c{i}")));
            }
            for i in 0..n {
                changes.push(destroyed(&format!("null_resource.d{i}")));
            }
            let buckets = classify(&changes);
            let pairs = Matcher::new(MatchStrategy::Positional).match_changes(&buckets);

            assert_eq!(pairs.len(), m.min(n));
            for (i, pair) in pairs.iter().enumerate() {
                assert_eq!(pair.created.name, format!("c{i}"));
                assert_eq!(pair.destroyed.name, format!("d{i}"));
            }
        }
    }

    #[test]
    fn test_never_pairs_across_types() {
        let changes = vec![created("aws_instance.web"), destroyed("aws_eip.web")];
        let buckets = classify(&changes);

        for strategy in [MatchStrategy::Positional, MatchStrategy::SameName] {
            assert!(Matcher::new(strategy).match_changes(&buckets).is_empty());
        }
    }

    #[test]
    fn test_same_name_pairs_matching_names() {
        let changes = vec![
            destroyed("module.old.aws_instance.web"),
            destroyed("module.old.aws_instance.api"),
            created("module.new.aws_instance.api"),
            created("module.new.aws_instance.web"),
            created("module.new.aws_instance.worker"),
        ];
        let buckets = classify(&changes);
        let pairs = Matcher::new(MatchStrategy::SameName).match_changes(&buckets);

        assert_eq!(
            addresses(&pairs),
            vec![
                (
                    String::from("module.new.aws_instance.api"),
                    String::from("module.old.aws_instance.api")
                ),
                (
                    String::from("module.new.aws_instance.web"),
                    String::from("module.old.aws_instance.web")
                ),
            ]
        );
    }

    #[test]
    fn test_same_name_first_match_wins() {
        let changes = vec![
            destroyed("module.a.aws_instance.web"),
            destroyed("module.b.aws_instance.web"),
            created("module.c.aws_instance.web"),
        ];
        let buckets = classify(&changes);
        let pairs = Matcher::new(MatchStrategy::SameName).match_changes(&buckets);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].destroyed.address.as_str(), "module.a.aws_instance.web");
    }

    #[test]
    fn test_same_name_consumes_matched_destroyed() {
        let changes = vec![
            destroyed("module.a.aws_instance.web"),
            created("module.b.aws_instance.web"),
            created("module.c.aws_instance.web"),
        ];
        let buckets = classify(&changes);
        let pairs = Matcher::new(MatchStrategy::SameName).match_changes(&buckets);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].created.address.as_str(), "module.b.aws_instance.web");
    }

    #[test]
    fn test_same_name_consume_moves_on_to_next_candidate() {
        let changes = vec![
            destroyed("module.a.aws_instance.web"),
            destroyed("module.b.aws_instance.web"),
            created("module.c.aws_instance.web"),
            created("module.d.aws_instance.web"),
        ];
        let buckets = classify(&changes);
        let pairs = Matcher::new(MatchStrategy::SameName).match_changes(&buckets);

        assert_eq!(
            addresses(&pairs),
            vec![
                (
                    String::from("module.c.aws_instance.web"),
                    String::from("module.a.aws_instance.web")
                ),
                (
                    String::from("module.d.aws_instance.web"),
                    String::from("module.b.aws_instance.web")
                ),
            ]
        );
    }

    #[test]
    fn test_same_name_allow_reuse() {
        let changes = vec![
            destroyed("module.a.aws_instance.web"),
            created("module.b.aws_instance.web"),
            created("module.c.aws_instance.web"),
        ];
        let buckets = classify(&changes);
        let matcher = Matcher::new(MatchStrategy::SameName).with_reuse(ReusePolicy::AllowReuse);
        let pairs = matcher.match_changes(&buckets);

        assert_eq!(pairs.len(), 2);
        assert!(pairs
            .iter()
            .all(|p| p.destroyed.address.as_str() == "module.a.aws_instance.web"));
    }

    #[test]
    fn test_same_name_without_match_is_unpaired() {
        let changes = vec![created("aws_instance.new"), destroyed("aws_instance.old")];
        let buckets = classify(&changes);
        let pairs = Matcher::new(MatchStrategy::SameName).match_changes(&buckets);

        assert!(pairs.is_empty());
    }

    #[test]
    fn test_buckets_visited_in_type_order() {
        let changes = vec![
            created("z_type.one"),
            destroyed("z_type.two"),
            created("a_type.one"),
            destroyed("a_type.two"),
        ];
        let buckets = classify(&changes);
        let pairs = Matcher::new(MatchStrategy::Positional).match_changes(&buckets);

        let types: Vec<_> = pairs.iter().map(|p| p.created.resource_type.as_str()).collect();
        assert_eq!(types, vec!["a_type", "z_type"]);
    }
}
