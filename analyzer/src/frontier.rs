//! Priority-ordered, deduplicated BFS frontier keyed by object id (spec §4.1).
//!
//! Ties within a priority level are broken by `visit_order`, giving a strict
//! BFS over `AlwaysReachable` edges first, then a BFS over paths containing
//! at least one `WeaklyReachable` step. `NeverReachable` edges never reach
//! the frontier at all.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use retainer_model::{ExclusionStatus, LeakNodeId, ObjectId, ObjectIdMetadata};

/// A frontier entry, ordered by `(priority, visit_order)` ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    priority: ExclusionStatus,
    visit_order: u64,
    node_id: LeakNodeId,
    instance: ObjectId,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.visit_order.cmp(&other.visit_order))
    }
}

/// Why `enqueue` declined to insert a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueDrop {
    /// `instance` is the null id.
    Null,
    /// `instance` has already been popped and visited.
    Visited,
    /// The edge's exclusion status is `NeverReachable`.
    NeverReachable,
    /// `instance` is already in the frontier with a priority at least as
    /// good as the one offered.
    NotBetter,
    /// `instance`'s metadata marks it uninteresting and it is not itself a
    /// leaking candidate (the frontier-bounding skip filter).
    SkipFiltered,
}

/// Outcome of an `enqueue` call, for caller-side bookkeeping.
pub type EnqueueOutcome = Result<(), EnqueueDrop>;

/// Best-first, deduplicated frontier over [`ObjectId`]s.
///
/// Maintains a max-heap-via-`Reverse` for O(log n) pop of the best node, a
/// `HashMap` of each enqueued id's current best priority (doubling as
/// frontier membership), and a `HashSet` of already-visited ids. Stale heap
/// entries left behind by a priority improvement are filtered lazily on pop
/// (spec §9) rather than removed eagerly, since `BinaryHeap` has no
/// decrease-key operation.
#[derive(Debug, Default)]
pub struct FrontierQueue {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    best_priority: HashMap<ObjectId, ExclusionStatus>,
    visited: HashSet<ObjectId>,
    high_water: usize,
}

impl FrontierQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best_priority.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.best_priority.len()
    }

    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    #[must_use]
    pub fn is_visited(&self, instance: ObjectId) -> bool {
        self.visited.contains(&instance)
    }

    /// Attempt to enqueue `instance` at `priority` (spec §4.1).
    ///
    /// `priority = None` means "no exclusion applies", encoded internally as
    /// [`ExclusionStatus::AlwaysReachable`].
    #[allow(clippy::too_many_arguments)]
    pub fn enqueue(
        &mut self,
        instance: ObjectId,
        node_id: LeakNodeId,
        visit_order: u64,
        priority: Option<ExclusionStatus>,
        metadata: ObjectIdMetadata,
        is_leaking_candidate: bool,
    ) -> EnqueueOutcome {
        if instance.is_null() {
            return Err(EnqueueDrop::Null);
        }
        if self.visited.contains(&instance) {
            return Err(EnqueueDrop::Visited);
        }
        if priority == Some(ExclusionStatus::NeverReachable) {
            return Err(EnqueueDrop::NeverReachable);
        }
        let p = priority.unwrap_or(ExclusionStatus::AlwaysReachable);

        if let Some(&existing) = self.best_priority.get(&instance) {
            if existing <= p {
                return Err(EnqueueDrop::NotBetter);
            }
        } else if !is_leaking_candidate && metadata.is_skippable() {
            return Err(EnqueueDrop::SkipFiltered);
        }

        self.best_priority.insert(instance, p);
        self.heap.push(Reverse(FrontierEntry {
            priority: p,
            visit_order,
            node_id,
            instance,
        }));
        let size = self.heap.len();
        if size > self.high_water {
            self.high_water = size;
        }
        Ok(())
    }

    /// Pop the best `(instance, node_id, priority)` triple, skipping any
    /// stale entries left by a priority improvement. Marks the popped id
    /// visited.
    pub fn pop(&mut self) -> Option<(ObjectId, LeakNodeId, ExclusionStatus)> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            match self.best_priority.get(&entry.instance) {
                Some(&current) if current == entry.priority => {
                    self.best_priority.remove(&entry.instance);
                    self.visited.insert(entry.instance);
                    return Some((entry.instance, entry.node_id, entry.priority));
                }
                _ => continue,
            }
        }
        None
    }
}
