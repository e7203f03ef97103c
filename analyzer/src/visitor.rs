//! For a popped record (class / instance / object-array), emits outbound
//! references onto the frontier and updates the dominator tracker (spec
//! §4.3). Any other record kind — or a missing record — is a leaf of the
//! search: the id has no outbound object references worth following.

use std::collections::HashMap;
use std::collections::HashSet;

use retainer_model::{
    ExclusionStatus, HeapValue, LeakNodeArena, LeakNodeId, LeakReference, ObjectId,
    ObjectIdMetadata, ReferenceKind, Record,
};

use crate::dominator::DominatorTracker;
use crate::error::AnalyzerError;
use crate::exclusion_index::ExclusionIndex;
use crate::frontier::{EnqueueDrop, FrontierQueue};
use crate::parser::SnapshotParser;

/// Instance fields named this are VM bookkeeping, never retaining edges
/// (spec §4.3, §6).
const STATIC_OVERHEAD_FIELD: &str = "$staticOverhead";

/// Counts of frontier decisions made while visiting one popped node, folded
/// into the driver's running [`crate::pathfinder::FindPathsStats`].
#[derive(Debug, Default, Clone, Copy)]
pub struct VisitOutcome {
    pub skip_filtered: usize,
    pub duplicates_dropped: usize,
}

impl VisitOutcome {
    fn record(&mut self, outcome: Result<(), EnqueueDrop>) {
        match outcome {
            Ok(()) => {}
            Err(EnqueueDrop::SkipFiltered) => self.skip_filtered += 1,
            Err(EnqueueDrop::NotBetter | EnqueueDrop::Visited) => self.duplicates_dropped += 1,
            Err(EnqueueDrop::Null | EnqueueDrop::NeverReachable) => {}
        }
    }
}

fn display_value(id: ObjectId) -> String {
    format!("object@{id}")
}

/// Visit the record for `popped_instance`, emitting outbound edges.
///
/// `popped_priority` is the worst exclusion status already encountered on
/// the path from the GC root to `popped_instance` (spec §4.1's "worst
/// status encountered along the way"). Every emitted child inherits at
/// least this priority — `max(popped_priority, edge_status)` — so a path
/// that has already crossed one excluded edge cannot masquerade as
/// `AlwaysReachable` just because a later edge happens to be unexcluded.
///
/// `dominator` is `None` when `compute_retained_heap_size` is off — the
/// visitor then skips every dominator-tracking call entirely (spec §4.3
/// gates those on retained-size mode).
///
/// # Errors
///
/// Propagates [`AnalyzerError::DominatorInvariantViolation`] from the
/// dominator tracker.
#[allow(clippy::too_many_arguments)]
pub fn visit(
    parser: &dyn SnapshotParser,
    popped_instance: ObjectId,
    popped_node_id: LeakNodeId,
    popped_priority: ExclusionStatus,
    arena: &mut LeakNodeArena,
    frontier: &mut FrontierQueue,
    exclusions: &ExclusionIndex,
    leaking: &HashSet<ObjectId>,
    mut dominator: Option<&mut DominatorTracker>,
) -> Result<VisitOutcome, AnalyzerError> {
    let mut outcome = VisitOutcome::default();

    let Some(record) = parser.retrieve_record(popped_instance) else {
        return Ok(outcome);
    };

    match record {
        Record::Class(class_record) => {
            for (field_name, value) in &class_record.static_fields {
                if field_name == STATIC_OVERHEAD_FIELD {
                    continue;
                }
                let Some(child) = value.as_object_id() else {
                    continue;
                };
                if child.is_null() {
                    continue;
                }
                // Leaking candidates dominate their own subtree (spec §3); never
                // record them as dominated-by or undominated themselves.
                if !leaking.contains(&child) {
                    if let Some(dom) = dominator.as_deref_mut() {
                        dom.undominate(child);
                    }
                }
                let exclusion = exclusions.static_field(&class_record.class_name, field_name);
                enqueue_child(
                    parser,
                    arena,
                    frontier,
                    leaking,
                    &mut outcome,
                    popped_node_id,
                    popped_priority,
                    child,
                    ReferenceKind::StaticField,
                    field_name.clone(),
                    exclusion.map(|e| (e.status, e.description.clone())),
                );
            }
        }

        Record::Instance(instance_record) => {
            let hydrated = parser.hydrate_instance(&instance_record);

            let mut merged_exclusions: HashMap<String, (ExclusionStatus, String)> = HashMap::new();
            for class_info in &hydrated.class_hierarchy {
                for field_name in &class_info.field_names {
                    if let Some(exclusion) =
                        exclusions.instance_field(&class_info.class_name, field_name)
                    {
                        merged_exclusions.insert(
                            field_name.clone(),
                            (exclusion.status, exclusion.description.clone()),
                        );
                    }
                }
            }

            let mut flattened: Vec<(String, HeapValue)> = Vec::new();
            for (class_info, values) in hydrated.class_hierarchy.iter().zip(&hydrated.field_values)
            {
                for (field_name, value) in class_info.field_names.iter().zip(values) {
                    flattened.push((field_name.clone(), *value));
                }
            }
            flattened.sort_by(|a, b| a.0.cmp(&b.0));

            for (field_name, value) in flattened {
                let Some(child) = value.as_object_id() else {
                    continue;
                };
                if child.is_null() {
                    continue;
                }
                if !leaking.contains(&child) {
                    if let Some(dom) = dominator.as_deref_mut() {
                        if parser.object_id_metadata(child) == ObjectIdMetadata::Class {
                            dom.undominate(child);
                        } else {
                            dom.update_dominator(instance_record.instance_id, child, leaking)?;
                        }
                    }
                }
                let exclusion = merged_exclusions.get(&field_name).cloned();
                enqueue_child(
                    parser,
                    arena,
                    frontier,
                    leaking,
                    &mut outcome,
                    popped_node_id,
                    popped_priority,
                    child,
                    ReferenceKind::InstanceField,
                    field_name,
                    exclusion,
                );
            }
        }

        Record::ObjectArray(array_record) => {
            for (index, &element_id) in array_record.element_ids.iter().enumerate() {
                if element_id.is_null() {
                    continue;
                }
                if !leaking.contains(&element_id) {
                    if let Some(dom) = dominator.as_deref_mut() {
                        if parser.object_id_metadata(element_id) == ObjectIdMetadata::Class {
                            dom.undominate(element_id);
                        } else {
                            dom.update_dominator(array_record.array_id, element_id, leaking)?;
                        }
                    }
                }
                enqueue_child(
                    parser,
                    arena,
                    frontier,
                    leaking,
                    &mut outcome,
                    popped_node_id,
                    popped_priority,
                    element_id,
                    ReferenceKind::ArrayEntry,
                    index.to_string(),
                    None,
                );
            }
        }

        Record::PrimitiveArray(_) => {}
    }

    Ok(outcome)
}

/// `popped_priority` is the worst status already accrued on the path to
/// `parent`; the child's frontier priority is `max(popped_priority,
/// edge_status)`, never the edge's own status in isolation, so an
/// already-excluded path can never look better than it is by crossing a
/// later unexcluded edge (spec §4.1, §3's Result rule).
#[allow(clippy::too_many_arguments)]
fn enqueue_child(
    parser: &dyn SnapshotParser,
    arena: &mut LeakNodeArena,
    frontier: &mut FrontierQueue,
    leaking: &HashSet<ObjectId>,
    outcome: &mut VisitOutcome,
    parent: LeakNodeId,
    popped_priority: ExclusionStatus,
    child: ObjectId,
    kind: ReferenceKind,
    name: String,
    exclusion: Option<(ExclusionStatus, String)>,
) {
    let edge_status = exclusion
        .as_ref()
        .map_or(ExclusionStatus::AlwaysReachable, |(status, _)| *status);
    let priority = popped_priority.max(edge_status);
    let description = exclusion.map(|(_, description)| description);
    let reference = LeakReference::new(kind, name, display_value(child));
    let node_id = arena.push_child(child, parent, reference, description);
    let node = arena.get(node_id);
    let visit_order = node.visit_order;
    let metadata = parser.object_id_metadata(child);
    let is_leaking = leaking.contains(&child);
    let result = frontier.enqueue(
        child,
        node_id,
        visit_order,
        Some(priority),
        metadata,
        is_leaking,
    );
    outcome.record(result);
}
