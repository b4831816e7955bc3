//! Validator for candidate moves.
//!
//! A candidate is accepted only if source and destination addresses differ
//! and the two records are not structurally identical. Any failure aborts
//! the whole run; there is no per-pair skip.

use std::fmt::Debug;
use tracing::debug;

use crate::error::{MoveError, Result};
use crate::resource::ResourceAddress;

use super::matcher::CandidatePair;

/// A validated move from an old address to a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePair {
    /// Address of the destroyed record.
    pub source: ResourceAddress,
    /// Address of the created record.
    pub destination: ResourceAddress,
}

/// Sanity checks for candidate pairs.
#[derive(Debug, Default)]
pub struct Validator;

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks a single candidate pair.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::AddressCollision`] if both records share an
    /// address, or [`MoveError::DiffCollision`] if they are structurally
    /// identical.
    pub fn validate(&self, pair: &CandidatePair<'_>) -> Result<()> {
        let (created, destroyed) = (pair.created, pair.destroyed);

        ensure_distinct(&created.address, &destroyed.address, || {
            MoveError::AddressCollision {
                address: created.address.to_string(),
            }
        })?;

        // Equality includes the address and created/destroyed diffs carry null
        // on opposite sides, so this cannot fail once the check above passes.
        // Do not rely on it to catch look-alike records.
        ensure_distinct(created, destroyed, || MoveError::DiffCollision {
            creation: created.to_string(),
            deletion: destroyed.to_string(),
        })?;

        Ok(())
    }

    /// Checks every pair in order and converts them into moves.
    ///
    /// # Errors
    ///
    /// Returns the first failure; no moves are returned in that case.
    pub fn validate_all(&self, pairs: &[CandidatePair<'_>]) -> Result<Vec<MovePair>> {
        pairs
            .iter()
            .map(|pair| {
                self.validate(pair)?;
                debug!(
                    "Accepted move {} -> {}",
                    pair.destroyed.address, pair.created.address
                );
                Ok(MovePair {
                    source: pair.destroyed.address.clone(),
                    destination: pair.created.address.clone(),
                })
            })
            .collect()
    }
}

/// Fails with the error built by `collision` when the two sides are equal.
///
/// # Errors
///
/// Returns the collision error if `creation == deletion`.
pub fn ensure_distinct<T, F>(creation: &T, deletion: &T, collision: F) -> Result<()>
where
    T: PartialEq + Debug + ?Sized,
    F: FnOnce() -> MoveError,
{
    if creation == deletion {
        debug!("Collision: creation={creation:?} deletion={deletion:?}");
        return Err(collision().into());
    }
    Ok(())
}
