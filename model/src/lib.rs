//! Retainer Model: the pure data types shared by the retained-path analyzer.
//!
//! This crate provides the data layer for the retained-path analyzer. It
//! depends on nothing else in the workspace — it does NOT depend on
//! `retainer-analyzer`.
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
//! - [`ObjectId`] / [`ObjectIdMetadata`] — snapshot identity and object kind
//! - [`Exclusion`] / [`ExclusionStatus`] — the exclusion policy and its priority order
//! - [`LeakNodeArena`] / [`LeakNodeId`] — the immutable, parent-linked retaining-path tree
//! - [`Record`] and friends — the record kinds the visitor dispatches over
//! - [`WeakRefMirror`] — a leaking-candidate descriptor
//! - [`LeakPathResult`] — one analyzer result per leaking candidate
//! - [`ProgressStep`] / [`ProgressListener`] — fire-and-forget progress notification

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod exclusion;
pub mod ids;
pub mod node;
pub mod progress;
pub mod record;
pub mod reference;
pub mod result;
pub mod weakref;

pub use exclusion::{Exclusion, ExclusionStatus};
pub use ids::{ObjectId, ObjectIdMetadata};
pub use node::{LeakNodeArena, LeakNodeData, LeakNodeId, LeakNodeKind};
pub use progress::{NoopProgressListener, ProgressListener, ProgressStep};
pub use record::{
    ClassInfo, ClassRecord, HeapValue, HydratedInstance, InstanceRecord, ObjectArrayRecord,
    PrimitiveArrayRecord, PrimitiveKind, Record,
};
pub use reference::{LeakReference, ReferenceKind};
pub use result::LeakPathResult;
pub use weakref::WeakRefMirror;
