// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # tfmv
//!
//! Infers `terraform state mv` commands from a plan that destroys and
//! recreates resources which were only renamed, moved between modules, or
//! re-indexed.
//!
//! ## Overview
//!
//! Refactoring Terraform code often turns into a plan that destroys a
//! resource at its old address and creates an identical one at the new
//! address. tfmv reads the plan, pairs those destructions with creations of
//! the same resource type, and prints the state moves that make the plan a
//! no-op instead. It never runs the moves itself.
//!
//! ## Pipeline
//!
//! 1. **Decode**: read `terraform show -json` output into resource changes
//! 2. **Classify**: bucket changes by type into created and destroyed
//! 3. **Match**: pair them by position or by name
//! 4. **Validate**: abort on any implausible pair
//! 5. **Emit**: render one `terraform state mv <old> <new>` per move
//!
//! ## Modules
//!
//! - [`config`]: Settings, config file and environment overrides
//! - [`resource`]: Addresses and change records
//! - [`plan`]: JSON plan decoding
//! - [`planner`]: Classifier, matcher, validator and emitter
//! - [`reconciler`]: The end-to-end pipeline
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```no_run
//! use tfmv::{MoveConfig, PlanReader, Reconciler};
//!
//! # fn main() -> tfmv::Result<()> {
//! let config = MoveConfig::default();
//! let changes = PlanReader::new().load_file(&config.plan_file)?;
//! let report = Reconciler::new(&config).reconcile(&changes)?;
//! for line in report.render_lines(config.quote) {
//!     eprintln!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod plan;
pub mod planner;
pub mod reconciler;
pub mod resource;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, OutputFormat, OutputFormatter};
pub use config::{ConfigParser, MatchStrategy, MoveConfig, ReusePolicy};
pub use error::{Result, TfmvError};
pub use plan::PlanReader;
pub use planner::{Matcher, MoveStatement, Validator, classify, emit};
pub use reconciler::{BucketSummary, MoveReport, Reconciler};
pub use resource::{ResourceAddress, ResourceChange};
