//! Retainer Analyzer: the single-threaded retained-path search engine.
//!
//! This crate provides the frontier, visitor, dominator-tracking, and
//! driver layers of the retained-path analyzer. It depends only on
//! `retainer-model` — it does NOT depend on `retainer-fixtures`.
//!
//! # Crate dependency graph
//!
//! ```text
//! retainer-model  ←  retainer-analyzer  ←  retainer-fixtures
//! (pure data)         (frontier, driver)    (synthetic snapshots)
//! ```
//!
//! # Key types
//!
//! - [`frontier::FrontierQueue`] — priority-ordered, deduplicated BFS frontier
//! - [`exclusion_index::ExclusionIndex`] — class×field exclusion lookup
//! - [`visitor::visit`] — emits outbound references for one popped record
//! - [`dominator::DominatorTracker`] — best-effort nearest-leaking-ancestor map
//! - [`pathfinder::RetainedPathAnalyzer`] — the public entry point, `find_paths`
//! - [`parser::SnapshotParser`] — the external collaborator trait

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dominator;
pub mod error;
pub mod exclusion_index;
pub mod frontier;
pub mod parser;
pub mod pathfinder;
pub mod visitor;

pub use dominator::DominatorTracker;
pub use error::AnalyzerError;
pub use exclusion_index::{ExclusionEntry, ExclusionIndex};
pub use frontier::{EnqueueDrop, FrontierQueue};
pub use parser::{IdSize, SnapshotParser};
pub use pathfinder::{AnalyzerLimits, FindPathsReport, FindPathsStats, RetainedPathAnalyzer};
