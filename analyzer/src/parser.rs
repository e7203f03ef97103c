//! The external collaborator contract (spec §6): everything the analyzer
//! needs from the HPROF parser, expressed as a trait so test fixtures and
//! benchmarks can supply an in-memory stand-in.

use retainer_model::{HydratedInstance, InstanceRecord, ObjectId, ObjectIdMetadata, Record};

use crate::exclusion_index::ExclusionEntry;

/// Reference width in the dump: affects only a caller's own size math, never
/// consulted by the search itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSize {
    Four,
    Eight,
}

impl IdSize {
    #[must_use]
    pub fn bytes(self) -> u64 {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

/// Read-only accessor for a parsed heap snapshot (spec §6).
///
/// Implementations must be idempotent and side-effect-free: `find_paths`
/// may call any method any number of times for the same id.
pub trait SnapshotParser {
    /// The record for `id`, or `None` if the id is unknown to the snapshot.
    fn retrieve_record(&self, id: ObjectId) -> Option<Record>;

    /// Constant-time tag lookup used by the frontier's skip filter.
    fn object_id_metadata(&self, id: ObjectId) -> ObjectIdMetadata;

    /// The fully-qualified name of a class object, by its class id.
    fn class_name(&self, class_id: ObjectId) -> String;

    /// Hydrate an instance into its parallel class-hierarchy/field-value
    /// arrays (spec §6): `field_values[i][j]` corresponds to
    /// `class_hierarchy[i].field_names[j]`.
    fn hydrate_instance(&self, record: &InstanceRecord) -> HydratedInstance;

    /// The dump's reference width.
    fn id_size(&self) -> IdSize;
}

/// Evaluated once per `find_paths` call, before the search begins (spec §6).
pub type ExclusionsFactory<'a> = Box<dyn FnOnce(&dyn SnapshotParser) -> Vec<ExclusionEntry> + 'a>;
