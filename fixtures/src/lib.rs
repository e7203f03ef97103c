//! Retainer Fixtures: an in-memory synthetic-heap builder and its
//! `SnapshotParser` implementation.
//!
//! Test-only, the way the teacher crate's `harness::worlds` module supplies
//! synthetic `SearchWorldV1` implementations for its own tests and
//! benchmarks without being part of the kernel's production API. Not part
//! of the library's public production surface.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod snapshot;

pub use snapshot::{InMemorySnapshot, InMemorySnapshotBuilder};
