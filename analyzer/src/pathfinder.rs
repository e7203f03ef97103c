//! Orchestrates the two-phase search, collects results, computes retained
//! sizes (spec §4.5). This is the analyzer's sole public entry point.

use std::collections::{HashMap, HashSet};

use retainer_model::{
    ExclusionStatus, LeakNodeArena, LeakPathResult, NoopProgressListener, ObjectId,
    PrimitiveArrayRecord, ProgressListener, ProgressStep, Record, WeakRefMirror,
};

use crate::dominator::DominatorTracker;
use crate::error::AnalyzerError;
use crate::exclusion_index::{ExclusionEntry, ExclusionIndex};
use crate::frontier::FrontierQueue;
use crate::parser::SnapshotParser;
use crate::visitor;

/// Safety-valve configuration, supplementing spec.md (§3-NEW.3 in
/// `SPEC_FULL.md`). Left at the default, `find_paths` reproduces spec.md's
/// algorithm exactly: unbounded results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerLimits {
    /// Stop recording new results once this many have been found. Does not
    /// stop the search itself — the two-phase retained-size continuation
    /// (spec §4.5 step 5.iv) still runs to completion.
    pub max_results: usize,
}

impl Default for AnalyzerLimits {
    fn default() -> Self {
        Self {
            max_results: usize::MAX,
        }
    }
}

/// Retrospective summary of one `find_paths` call, populated unconditionally
/// (spec §3-NEW.2 in `SPEC_FULL.md`) — the ambient substitute for a logging
/// framework the teacher crate also does without.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindPathsStats {
    pub nodes_visited: usize,
    pub frontier_high_water: usize,
    pub duplicates_dropped: usize,
    pub skip_filtered: usize,
    pub undominated_count: usize,
    /// `true` iff a supplied cancellation check requested early return.
    pub cancelled: bool,
}

/// The outcome of one `find_paths` call: per-candidate results plus the
/// retaining-path tree they reference and the run's stats.
#[derive(Debug)]
pub struct FindPathsReport {
    pub results: Vec<LeakPathResult>,
    pub stats: FindPathsStats,
    /// Owns every [`retainer_model::LeakNodeId`] referenced by `results`;
    /// use [`LeakNodeArena::path_to`] to recover a full root-to-leak path.
    pub arena: LeakNodeArena,
}

/// The retained-path analyzer (spec §4.5). Holds no state between calls —
/// all working state lives in `find_paths`'s stack frame and is dropped at
/// return, matching spec §3's lifecycle rule ("reusable but not
/// thread-safe").
#[derive(Debug, Clone, Copy, Default)]
pub struct RetainedPathAnalyzer {
    limits: AnalyzerLimits,
}

impl RetainedPathAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limits(limits: AnalyzerLimits) -> Self {
        Self { limits }
    }

    /// Run the search with no progress listener and no cancellation check.
    ///
    /// # Errors
    ///
    /// See [`Self::find_paths`].
    pub fn find_paths_simple(
        &self,
        parser: &dyn SnapshotParser,
        exclusions_factory: impl FnOnce(&dyn SnapshotParser) -> Vec<ExclusionEntry>,
        leaking_weak_refs: Vec<WeakRefMirror>,
        gc_root_ids: Vec<ObjectId>,
        compute_retained_heap_size: bool,
    ) -> Result<FindPathsReport, AnalyzerError> {
        self.find_paths(
            parser,
            exclusions_factory,
            leaking_weak_refs,
            gc_root_ids,
            compute_retained_heap_size,
            &NoopProgressListener,
            None,
        )
    }

    /// Find the shortest retaining path to each leaking candidate, and
    /// optionally its retained heap size (spec §4.5).
    ///
    /// `cancellation`, if supplied, is checked once per main-loop iteration
    /// and once before the retained-size phase (spec §5-NEW.1, an additive
    /// extension point): returning `true` ends the search early with
    /// whatever results have been found so far and `stats.cancelled = true`,
    /// rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::MalformedRecord`] if a dominated id's record
    /// is not one of the four known kinds during retained-size accounting,
    /// or [`AnalyzerError::DominatorInvariantViolation`] if the dominator
    /// tracker's invariants are violated (an internal bug). Both abort
    /// without any partial results (spec §7).
    pub fn find_paths(
        &self,
        parser: &dyn SnapshotParser,
        exclusions_factory: impl FnOnce(&dyn SnapshotParser) -> Vec<ExclusionEntry>,
        leaking_weak_refs: Vec<WeakRefMirror>,
        gc_root_ids: Vec<ObjectId>,
        compute_retained_heap_size: bool,
        progress: &dyn ProgressListener,
        cancellation: Option<&dyn Fn() -> bool>,
    ) -> Result<FindPathsReport, AnalyzerError> {
        progress.on_progress_update(ProgressStep::FindingShortestPaths);

        let mut arena = LeakNodeArena::new();
        let mut frontier = FrontierQueue::new();

        let exclusion_entries = exclusions_factory(parser);
        let exclusion_index = ExclusionIndex::build(exclusion_entries);

        let leaking_ids: HashSet<ObjectId> =
            leaking_weak_refs.iter().map(|w| w.referent).collect();
        let referent_map: HashMap<ObjectId, WeakRefMirror> = leaking_weak_refs
            .into_iter()
            .map(|w| (w.referent, w))
            .collect();

        let mut dominator = compute_retained_heap_size.then(DominatorTracker::new);

        for root_id in gc_root_ids {
            if let Some(dom) = dominator.as_mut() {
                dom.undominate(root_id);
            }
            let node_id = arena.push_root(root_id);
            let visit_order = arena.get(node_id).visit_order;
            let metadata = parser.object_id_metadata(root_id);
            let is_leaking = leaking_ids.contains(&root_id);
            let _ = frontier.enqueue(root_id, node_id, visit_order, None, metadata, is_leaking);
        }

        let mut lowest_priority = ExclusionStatus::AlwaysReachable;
        let mut results: Vec<LeakPathResult> = Vec::new();
        let mut stats = FindPathsStats::default();
        let mut cancelled = false;
        let mut entered_dominator_phase = false;

        while let Some((instance, node_id, priority)) = frontier.pop() {
            if let Some(check) = cancellation {
                if check() {
                    cancelled = true;
                    break;
                }
            }

            lowest_priority = lowest_priority.max(priority);
            stats.nodes_visited += 1;

            if let Some(weak_reference) = referent_map.get(&instance) {
                if results.len() < self.limits.max_results {
                    results.push(LeakPathResult {
                        leaking_node: node_id,
                        exclusion_status: if priority == ExclusionStatus::AlwaysReachable {
                            None
                        } else {
                            Some(priority)
                        },
                        weak_reference: weak_reference.clone(),
                        retained_heap_size: None,
                    });
                }
            }

            if results.len() == referent_map.len() {
                if compute_retained_heap_size && lowest_priority < ExclusionStatus::WeaklyReachable
                {
                    if !entered_dominator_phase {
                        progress.on_progress_update(ProgressStep::FindingDominators);
                        entered_dominator_phase = true;
                    }
                } else {
                    break;
                }
            }

            let outcome = visitor::visit(
                parser,
                instance,
                node_id,
                priority,
                &mut arena,
                &mut frontier,
                &exclusion_index,
                &leaking_ids,
                dominator.as_mut(),
            )?;
            stats.skip_filtered += outcome.skip_filtered;
            stats.duplicates_dropped += outcome.duplicates_dropped;
        }

        stats.frontier_high_water = frontier.high_water();
        stats.cancelled = cancelled;

        if compute_retained_heap_size && !cancelled {
            if let Some(check) = cancellation {
                if check() {
                    stats.cancelled = true;
                    return Ok(FindPathsReport {
                        results,
                        stats,
                        arena,
                    });
                }
            }
            progress.on_progress_update(ProgressStep::CalculatingRetainedSize);

            let dominator = dominator.expect("dominator tracker present when retained-size mode is on");
            stats.undominated_count = dominator.undominated_len();

            let mut retained_sizes: HashMap<ObjectId, u64> = HashMap::new();
            for (instance_id, dominator_id) in dominator.dominated_pairs() {
                let shallow = shallow_size(parser, instance_id)?;
                *retained_sizes.entry(dominator_id).or_insert(0) += shallow;
            }
            for result in &results {
                let leaking_instance_id = result.weak_reference.referent;
                let own_size = shallow_size(parser, leaking_instance_id)?;
                *retained_sizes.entry(leaking_instance_id).or_insert(0) += own_size;
            }
            for result in &mut results {
                let leaking_instance_id = result.weak_reference.referent;
                result.retained_heap_size =
                    Some(*retained_sizes.get(&leaking_instance_id).unwrap_or(&0));
            }
        }

        Ok(FindPathsReport {
            results,
            stats,
            arena,
        })
    }
}

/// Shallow size of `instance_id`'s record, for retained-size accounting
/// (spec §4.5 step 6.3). Primitive-array widths are fixed per spec §6.
fn shallow_size(parser: &dyn SnapshotParser, instance_id: ObjectId) -> Result<u64, AnalyzerError> {
    match parser.retrieve_record(instance_id) {
        Some(Record::Instance(_)) => {
            // The instance's own record carries no size; resolve via its class.
            let metadata_record = instance_class_record(parser, instance_id)?;
            Ok(metadata_record.instance_size)
        }
        Some(Record::Class(class_record)) => Ok(class_record.instance_size),
        Some(Record::ObjectArray(array_record)) => {
            Ok(array_record.element_ids.len() as u64 * parser.id_size().bytes())
        }
        Some(Record::PrimitiveArray(primitive_array)) => {
            Ok(primitive_array_shallow_size(&primitive_array))
        }
        None => Err(AnalyzerError::MalformedRecord {
            object_id: instance_id,
            detail: "no record found for a dominated id during retained-size accounting".into(),
        }),
    }
}

fn primitive_array_shallow_size(record: &PrimitiveArrayRecord) -> u64 {
    record.shallow_size()
}

/// Resolve an instance's class record to read its cumulative `instance_size`.
fn instance_class_record(
    parser: &dyn SnapshotParser,
    instance_id: ObjectId,
) -> Result<retainer_model::ClassRecord, AnalyzerError> {
    let Some(Record::Instance(instance_record)) = parser.retrieve_record(instance_id) else {
        return Err(AnalyzerError::MalformedRecord {
            object_id: instance_id,
            detail: "expected an instance record".into(),
        });
    };
    match parser.retrieve_record(instance_record.class_id) {
        Some(Record::Class(class_record)) => Ok(class_record),
        _ => Err(AnalyzerError::MalformedRecord {
            object_id: instance_record.class_id,
            detail: "instance's class_id did not resolve to a class record".into(),
        }),
    }
}
