//! Load/performance test-plan builder.
//!
//! Turns a handful of scenario parameters into a hierarchical execution plan:
//! how many virtual users to start, how each logs in exactly once with its own
//! credentials row, and when an anti-forgery token must be threaded from the
//! login response into the request under test. Running the plan is the job of
//! an external execution engine.
//!
//! - **[`core`]**: Pure, deterministic logic (scenario validation, augmentation
//!   decisions, tree assembly, invariant checks). No I/O.
//! - **[`io`]**: Settings, scenario files and plan JSON on disk.
//! - **[`plan`]**: The tree handed to the engine.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod plan;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::builder::PlanBuilder;
pub use crate::core::scenario::ScenarioSpec;
pub use crate::error::PlanError;
pub use crate::plan::{NodeKind, PlanNode};
