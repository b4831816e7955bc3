//! Reconciler turning a plan's creations and destructions into moves.
//!
//! This module runs the full pipeline over one decoded plan: classify,
//! match, validate and emit. A validation failure aborts the run and no
//! statements are returned.

use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::config::{MatchStrategy, MoveConfig, ReusePolicy};
use crate::error::Result;
use crate::planner::{
    CandidatePair, ChangesByType, Matcher, MoveStatement, Validator, classify, emit,
};
use crate::resource::ResourceChange;

/// Runs move inference with a fixed configuration.
#[derive(Debug)]
pub struct Reconciler<'a> {
    /// Configuration.
    config: &'a MoveConfig,
    /// Pair matcher.
    matcher: Matcher,
    /// Pair validator.
    validator: Validator,
}

/// Result of a reconciliation run.
#[derive(Debug)]
pub struct MoveReport {
    /// Strategy used for matching.
    pub strategy: MatchStrategy,
    /// Reuse policy used for matching.
    pub reuse: ReusePolicy,
    /// Statements in discovery order.
    pub statements: Vec<MoveStatement>,
    /// Per-type counts, in type order.
    pub buckets: Vec<BucketSummary>,
}

/// Counts for one resource type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BucketSummary {
    /// Resource type.
    pub resource_type: String,
    /// Records the plan creates.
    pub created: usize,
    /// Records the plan destroys.
    pub destroyed: usize,
    /// Moves found.
    pub matched: usize,
    /// Created records left without a move.
    pub unmatched_created: usize,
    /// Destroyed records left without a move.
    pub unmatched_destroyed: usize,
}

impl<'a> Reconciler<'a> {
    /// Creates a new reconciler.
    #[must_use]
    pub const fn new(config: &'a MoveConfig) -> Self {
        Self {
            config,
            matcher: Matcher::new(config.strategy).with_reuse(config.reuse),
            validator: Validator::new(),
        }
    }

    /// Infers moves for the given resource changes.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure. Partial results are never
    /// returned.
    pub fn reconcile(&self, changes: &[ResourceChange]) -> Result<MoveReport> {
        info!(
            "Inferring moves for {} resource changes (strategy: {}, reuse: {})",
            changes.len(),
            self.config.strategy,
            self.config.reuse
        );

        let buckets = classify(changes);
        debug!("Classified into {} resource types", buckets.len());

        let candidates = self.matcher.match_changes(&buckets);
        debug!("Matcher proposed {} candidate moves", candidates.len());

        let moves = self.validator.validate_all(&candidates)?;
        let statements = emit(&moves);

        info!("Found {} moves", statements.len());

        Ok(MoveReport {
            strategy: self.matcher.strategy(),
            reuse: self.matcher.reuse(),
            statements,
            buckets: summarize(&buckets, &candidates),
        })
    }
}

fn summarize(buckets: &ChangesByType<'_>, candidates: &[CandidatePair<'_>]) -> Vec<BucketSummary> {
    buckets
        .iter()
        .map(|(resource_type, bucket)| {
            let pairs: Vec<_> = candidates
                .iter()
                .filter(|p| p.created.resource_type == *resource_type)
                .collect();
            let used_destroyed: BTreeSet<_> = pairs
                .iter()
                .map(|p| std::ptr::from_ref(p.destroyed))
                .collect();

            BucketSummary {
                resource_type: (*resource_type).to_string(),
                created: bucket.created.len(),
                destroyed: bucket.destroyed.len(),
                matched: pairs.len(),
                unmatched_created: bucket.created.len().saturating_sub(pairs.len()),
                unmatched_destroyed: bucket.destroyed.len().saturating_sub(used_destroyed.len()),
            }
        })
        .collect()
}

impl MoveReport {
    /// Returns true if no moves were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Renders every statement, one per line.
    #[must_use]
    pub fn render_lines(&self, quote: bool) -> Vec<String> {
        self.statements.iter().map(|s| s.render(quote)).collect()
    }
}
