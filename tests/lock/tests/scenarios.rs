//! End-to-end scenarios S1-S6 from spec.md §8, plus the determinism property
//! (property 7) exercised across the full driver rather than one component.
//!
//! Focused unit tests for properties 1, 2, 4, 5 live alongside the modules
//! they pin down (`frontier.rs`, `visitor.rs`, `dominator.rs`); this crate
//! covers the cross-module, end-to-end behavior only.

use retainer_analyzer::{ExclusionEntry, RetainedPathAnalyzer};
use retainer_fixtures::InMemorySnapshotBuilder;
use retainer_model::{Exclusion, ExclusionStatus, HeapValue, ObjectId, PrimitiveKind, WeakRefMirror};

fn weak_ref(referent: u64) -> WeakRefMirror {
    WeakRefMirror::new(ObjectId(referent), format!("key-{referent}"), "com.example.Leak")
}

/// S1: linear path, no exclusions. R -> A -> L, expect path `[R, A, L]` with
/// `exclusion_status = None`.
#[test]
fn s1_linear_path_no_exclusions() {
    let snapshot = InMemorySnapshotBuilder::new()
        .with_instance(
            ObjectId(1),
            ObjectId(100),
            vec![("com.example.R", vec![("child", HeapValue::Object(ObjectId(2)))])],
        )
        .with_instance(
            ObjectId(2),
            ObjectId(101),
            vec![("com.example.A", vec![("next", HeapValue::Object(ObjectId(3)))])],
        )
        .build();

    let analyzer = RetainedPathAnalyzer::new();
    let report = analyzer
        .find_paths_simple(&snapshot, |_| Vec::new(), vec![weak_ref(3)], vec![ObjectId(1)], false)
        .unwrap();

    assert_eq!(report.results.len(), 1);
    let result = &report.results[0];
    assert_eq!(result.exclusion_status, None);
    assert_eq!(
        report.arena.path_to(result.leaking_node),
        vec![ObjectId(1), ObjectId(2), ObjectId(3)]
    );
}

/// S2: two paths exist, one via an excluded static field. The unrestricted
/// path wins: `L`'s parent is `B`, `exclusion_status = None`.
#[test]
fn s2_unrestricted_path_wins_over_excluded_alternative() {
    let snapshot = InMemorySnapshotBuilder::new()
        .with_instance(
            ObjectId(1),
            ObjectId(100),
            vec![(
                "com.example.R",
                vec![
                    ("bInstance", HeapValue::Object(ObjectId(3))),
                    ("clsRef", HeapValue::Object(ObjectId(2))),
                ],
            )],
        )
        .with_class(
            ObjectId(2),
            "FOO",
            vec![("bar", HeapValue::Object(ObjectId(10)))],
            8,
        )
        .with_instance(
            ObjectId(3),
            ObjectId(102),
            vec![("com.example.B", vec![("next", HeapValue::Object(ObjectId(10)))])],
        )
        .build();

    let exclusions_factory = |_: &dyn retainer_analyzer::SnapshotParser| {
        vec![ExclusionEntry::StaticField {
            class_name: "FOO".into(),
            field_name: "bar".into(),
            exclusion: Exclusion::new(ExclusionStatus::WeaklyReachable, "benign static cache"),
        }]
    };

    let analyzer = RetainedPathAnalyzer::new();
    let report = analyzer
        .find_paths_simple(&snapshot, exclusions_factory, vec![weak_ref(10)], vec![ObjectId(1)], false)
        .unwrap();

    assert_eq!(report.results.len(), 1);
    let result = &report.results[0];
    assert_eq!(result.exclusion_status, None);
    let path = report.arena.path_to(result.leaking_node);
    assert_eq!(path, vec![ObjectId(1), ObjectId(3), ObjectId(10)], "parent of L must be B, not A");
}

/// S3: only the excluded path exists. Expect `exclusion_status =
/// WeaklyReachable` via the static-field edge.
#[test]
fn s3_only_excluded_path_exists() {
    let snapshot = InMemorySnapshotBuilder::new()
        .with_instance(
            ObjectId(1),
            ObjectId(100),
            vec![("com.example.R", vec![("clsRef", HeapValue::Object(ObjectId(2)))])],
        )
        .with_class(
            ObjectId(2),
            "FOO",
            vec![("bar", HeapValue::Object(ObjectId(10)))],
            8,
        )
        .build();

    let exclusions_factory = |_: &dyn retainer_analyzer::SnapshotParser| {
        vec![ExclusionEntry::StaticField {
            class_name: "FOO".into(),
            field_name: "bar".into(),
            exclusion: Exclusion::new(ExclusionStatus::WeaklyReachable, "benign static cache"),
        }]
    };

    let analyzer = RetainedPathAnalyzer::new();
    let report = analyzer
        .find_paths_simple(&snapshot, exclusions_factory, vec![weak_ref(10)], vec![ObjectId(1)], false)
        .unwrap();

    assert_eq!(report.results.len(), 1);
    let result = &report.results[0];
    assert_eq!(result.exclusion_status, Some(ExclusionStatus::WeaklyReachable));
    assert_eq!(
        report.arena.path_to(result.leaking_node),
        vec![ObjectId(1), ObjectId(2), ObjectId(10)]
    );
}

/// Property 3 (`maxExclusionStatus` lex-optimality), propagation case: the
/// excluded edge sits in the *middle* of the only path to `L`, not on the
/// final edge reaching it. `R -> FOO (via excluded static field "bar") -> A
/// -> L (unexcluded instance field "next")`. The whole subtree past the
/// excluded edge must inherit `WeaklyReachable`, not reset to
/// `AlwaysReachable` just because the last edge is clean.
#[test]
fn exclusion_propagates_through_an_intermediate_unexcluded_edge() {
    let snapshot = InMemorySnapshotBuilder::new()
        .with_instance(
            ObjectId(1),
            ObjectId(100),
            vec![("com.example.R", vec![("clsRef", HeapValue::Object(ObjectId(2)))])],
        )
        .with_class(
            ObjectId(2),
            "FOO",
            vec![("bar", HeapValue::Object(ObjectId(3)))],
            8,
        )
        .with_instance(
            ObjectId(3),
            ObjectId(103),
            vec![("com.example.A", vec![("next", HeapValue::Object(ObjectId(10)))])],
        )
        .build();

    let exclusions_factory = |_: &dyn retainer_analyzer::SnapshotParser| {
        vec![ExclusionEntry::StaticField {
            class_name: "FOO".into(),
            field_name: "bar".into(),
            exclusion: Exclusion::new(ExclusionStatus::WeaklyReachable, "benign static cache"),
        }]
    };

    let analyzer = RetainedPathAnalyzer::new();
    let report = analyzer
        .find_paths_simple(&snapshot, exclusions_factory, vec![weak_ref(10)], vec![ObjectId(1)], false)
        .unwrap();

    assert_eq!(report.results.len(), 1);
    let result = &report.results[0];
    assert_eq!(
        result.exclusion_status,
        Some(ExclusionStatus::WeaklyReachable),
        "the unexcluded A -> L edge must not erase the WeaklyReachable status \
         already accrued via FOO.bar"
    );
    assert_eq!(
        report.arena.path_to(result.leaking_node),
        vec![ObjectId(1), ObjectId(2), ObjectId(3), ObjectId(10)]
    );
}

/// S4: a string referent sits between the root and the leak. Strings are
/// skip-filtered unless themselves leaking, so the leak is unreachable.
#[test]
fn s4_string_referent_is_skipped_leaving_leak_unreachable() {
    let snapshot = InMemorySnapshotBuilder::new()
        .with_instance(
            ObjectId(1),
            ObjectId(100),
            vec![("com.example.R", vec![("str", HeapValue::Object(ObjectId(2)))])],
        )
        .with_metadata(ObjectId(2), retainer_model::ObjectIdMetadata::String)
        .with_instance(
            ObjectId(2),
            ObjectId(101),
            vec![("java.lang.String", vec![("value", HeapValue::Object(ObjectId(3)))])],
        )
        .build();

    let analyzer = RetainedPathAnalyzer::new();
    let report = analyzer
        .find_paths_simple(&snapshot, |_| Vec::new(), vec![weak_ref(3)], vec![ObjectId(1)], false)
        .unwrap();

    assert!(report.results.is_empty());
}

/// S5: `L` dominates a subtree of `{X (instance, size 16), Y (byte[8])}` with
/// no sharing. Expect `retained_heap_size(L) == L.instance_size + 16 + 8`.
#[test]
fn s5_retained_size_aggregates_exclusive_subtree() {
    let snapshot = InMemorySnapshotBuilder::new()
        .with_instance(
            ObjectId(1),
            ObjectId(100),
            vec![("com.example.R", vec![("leak", HeapValue::Object(ObjectId(10)))])],
        )
        .with_class(ObjectId(900), "com.example.Leak", Vec::new(), 24)
        .with_instance(
            ObjectId(10),
            ObjectId(900),
            vec![("com.example.Leak", vec![("x", HeapValue::Object(ObjectId(20)))])],
        )
        .with_class(ObjectId(901), "com.example.X", Vec::new(), 16)
        .with_instance(
            ObjectId(20),
            ObjectId(901),
            vec![("com.example.X", vec![("y", HeapValue::Object(ObjectId(30)))])],
        )
        .with_primitive_array(ObjectId(30), PrimitiveKind::Byte, 8)
        .build();

    let analyzer = RetainedPathAnalyzer::new();
    let report = analyzer
        .find_paths_simple(&snapshot, |_| Vec::new(), vec![weak_ref(10)], vec![ObjectId(1)], true)
        .unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].retained_heap_size, Some(24 + 16 + 8));
}

/// S6: `L1` and `L2` both reference `C`. No common leaking ancestor exists,
/// so `C` contributes to neither candidate's retained size.
#[test]
fn s6_shared_child_is_undominated_by_either_candidate() {
    let snapshot = InMemorySnapshotBuilder::new()
        .with_instance(
            ObjectId(1),
            ObjectId(100),
            vec![(
                "com.example.R",
                vec![
                    ("l1", HeapValue::Object(ObjectId(10))),
                    ("l2", HeapValue::Object(ObjectId(11))),
                ],
            )],
        )
        .with_class(ObjectId(900), "com.example.L1", Vec::new(), 24)
        .with_instance(
            ObjectId(10),
            ObjectId(900),
            vec![("com.example.L1", vec![("c", HeapValue::Object(ObjectId(20)))])],
        )
        .with_class(ObjectId(901), "com.example.L2", Vec::new(), 32)
        .with_instance(
            ObjectId(11),
            ObjectId(901),
            vec![("com.example.L2", vec![("c", HeapValue::Object(ObjectId(20)))])],
        )
        .with_class(ObjectId(902), "com.example.C", Vec::new(), 5)
        .with_instance(ObjectId(20), ObjectId(902), vec![("com.example.C", Vec::new())])
        .build();

    let analyzer = RetainedPathAnalyzer::new();
    let report = analyzer
        .find_paths_simple(
            &snapshot,
            |_| Vec::new(),
            vec![weak_ref(10), weak_ref(11)],
            vec![ObjectId(1)],
            true,
        )
        .unwrap();

    assert_eq!(report.results.len(), 2);
    for result in &report.results {
        let expected_own_size = if result.weak_reference.referent == ObjectId(10) { 24 } else { 32 };
        assert_eq!(
            result.retained_heap_size,
            Some(expected_own_size),
            "C's bytes must not be attributed to either candidate"
        );
    }
}

/// Property 7 (determinism): two runs over the same inputs produce identical
/// result sequences, thanks to sorted field traversal and `visit_order`
/// tie-breaking.
#[test]
fn determinism_across_repeated_runs() {
    let build = || {
        InMemorySnapshotBuilder::new()
            .with_instance(
                ObjectId(1),
                ObjectId(100),
                vec![(
                    "com.example.R",
                    vec![
                        ("zeta", HeapValue::Object(ObjectId(3))),
                        ("alpha", HeapValue::Object(ObjectId(2))),
                    ],
                )],
            )
            .with_instance(
                ObjectId(2),
                ObjectId(101),
                vec![("com.example.A", vec![("next", HeapValue::Object(ObjectId(10)))])],
            )
            .with_instance(
                ObjectId(3),
                ObjectId(102),
                vec![("com.example.B", vec![("next", HeapValue::Object(ObjectId(10)))])],
            )
            .build()
    };

    let analyzer = RetainedPathAnalyzer::new();
    let run = |snapshot: &retainer_fixtures::InMemorySnapshot| {
        analyzer
            .find_paths_simple(snapshot, |_| Vec::new(), vec![weak_ref(10)], vec![ObjectId(1)], false)
            .unwrap()
    };

    let first = run(&build());
    let second = run(&build());

    assert_eq!(first.results.len(), second.results.len());
    assert_eq!(
        first.arena.path_to(first.results[0].leaking_node),
        second.arena.path_to(second.results[0].leaking_node),
    );
    assert_eq!(
        first.arena.path_to(first.results[0].leaking_node),
        vec![ObjectId(1), ObjectId(2), ObjectId(10)],
        "alpha sorts before zeta, so A's path wins deterministically"
    );
}
