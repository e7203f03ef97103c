//! The analyzer's per-candidate output.

use crate::exclusion::ExclusionStatus;
use crate::node::LeakNodeId;
use crate::weakref::WeakRefMirror;

/// One result per leaking candidate found.
///
/// Named `LeakPathResult` rather than `Result` to avoid colliding with
/// `std::result::Result` at call sites.
#[derive(Debug, Clone)]
pub struct LeakPathResult {
    /// The node in the retaining-path tree for the leaking instance itself.
    pub leaking_node: LeakNodeId,
    /// `None` iff the path consists entirely of unexcluded edges.
    pub exclusion_status: Option<ExclusionStatus>,
    pub weak_reference: WeakRefMirror,
    /// Populated only when `compute_retained_heap_size` was requested.
    pub retained_heap_size: Option<u64>,
}
