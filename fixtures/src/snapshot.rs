//! `InMemorySnapshot`: a synthetic heap snapshot assembled in-process, and
//! its `SnapshotParser` implementation.
//!
//! Mirrors the way the teacher crate's world modules assemble a
//! `ByteStateV1` fixture by hand rather than parsing one off disk: tests
//! describe a small object graph directly in Rust, the builder turns it
//! into the records the analyzer expects, and nothing here touches a real
//! HPROF file.

use std::collections::HashMap;

use retainer_analyzer::{IdSize, SnapshotParser};
use retainer_model::{
    ClassInfo, ClassRecord, HeapValue, HydratedInstance, InstanceRecord, ObjectArrayRecord,
    ObjectId, ObjectIdMetadata, PrimitiveArrayRecord, PrimitiveKind, Record,
};

/// One level of an instance's class hierarchy as given to the builder:
/// `(class_name, [(field_name, value)])`.
pub type InstanceLevel<'a> = (&'a str, Vec<(&'a str, HeapValue)>);

/// A synthetic heap snapshot built by [`InMemorySnapshotBuilder`].
///
/// Implements [`SnapshotParser`] directly; test code drives `find_paths`
/// against it exactly as it would against a real HPROF-backed parser.
#[derive(Debug, Clone)]
pub struct InMemorySnapshot {
    records: HashMap<ObjectId, Record>,
    metadata: HashMap<ObjectId, ObjectIdMetadata>,
    class_names: HashMap<ObjectId, String>,
    hydrations: HashMap<ObjectId, HydratedInstance>,
    id_size: IdSize,
}

impl Default for InMemorySnapshot {
    /// Defaults to 8-byte references — the common case for a 64-bit JVM
    /// heap dump; callers targeting a 32-bit dump use `with_id_size`.
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            metadata: HashMap::new(),
            class_names: HashMap::new(),
            hydrations: HashMap::new(),
            id_size: IdSize::Eight,
        }
    }
}

impl SnapshotParser for InMemorySnapshot {
    fn retrieve_record(&self, id: ObjectId) -> Option<Record> {
        self.records.get(&id).cloned()
    }

    fn object_id_metadata(&self, id: ObjectId) -> ObjectIdMetadata {
        self.metadata
            .get(&id)
            .copied()
            .unwrap_or(ObjectIdMetadata::Instance)
    }

    fn class_name(&self, class_id: ObjectId) -> String {
        self.class_names.get(&class_id).cloned().unwrap_or_default()
    }

    fn hydrate_instance(&self, record: &InstanceRecord) -> HydratedInstance {
        self.hydrations
            .get(&record.instance_id)
            .cloned()
            .unwrap_or(HydratedInstance {
                class_hierarchy: Vec::new(),
                field_values: Vec::new(),
            })
    }

    fn id_size(&self) -> IdSize {
        self.id_size
    }
}

/// Builds an [`InMemorySnapshot`] one record at a time.
///
/// Every `with_*` method takes and returns `Self` by value, so fixtures read
/// as a single chained expression — same shape as the teacher's
/// `WorldHarnessV1` fixture assembly.
#[derive(Debug, Default)]
pub struct InMemorySnapshotBuilder {
    snapshot: InMemorySnapshot,
}

impl InMemorySnapshotBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id_size(mut self, id_size: IdSize) -> Self {
        self.snapshot.id_size = id_size;
        self
    }

    /// Register a class dump: static fields plus the cumulative
    /// `instance_size` used for retained-size accounting.
    #[must_use]
    pub fn with_class(
        mut self,
        class_id: ObjectId,
        class_name: &str,
        static_fields: Vec<(&str, HeapValue)>,
        instance_size: u64,
    ) -> Self {
        self.snapshot.class_names.insert(class_id, class_name.to_string());
        self.snapshot.metadata.insert(class_id, ObjectIdMetadata::Class);
        self.snapshot.records.insert(
            class_id,
            Record::Class(ClassRecord {
                class_id,
                class_name: class_name.to_string(),
                static_fields: static_fields
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value))
                    .collect(),
                instance_size,
            }),
        );
        self
    }

    /// Register an instance dump together with its hydrated class hierarchy,
    /// root-class first. `class_id` is the instance's own class, used to
    /// resolve `instance_size` for retained-size accounting — register it
    /// separately with [`Self::with_class`].
    #[must_use]
    pub fn with_instance(
        mut self,
        instance_id: ObjectId,
        class_id: ObjectId,
        hierarchy: Vec<InstanceLevel<'_>>,
    ) -> Self {
        self.snapshot.metadata.insert(instance_id, ObjectIdMetadata::Instance);
        self.snapshot.records.insert(
            instance_id,
            Record::Instance(InstanceRecord {
                instance_id,
                class_id,
            }),
        );
        let mut class_hierarchy = Vec::with_capacity(hierarchy.len());
        let mut field_values = Vec::with_capacity(hierarchy.len());
        for (class_name, fields) in hierarchy {
            let field_names = fields.iter().map(|(name, _)| (*name).to_string()).collect();
            let values = fields.into_iter().map(|(_, value)| value).collect();
            class_hierarchy.push(ClassInfo {
                class_name: class_name.to_string(),
                field_names,
            });
            field_values.push(values);
        }
        self.snapshot.hydrations.insert(
            instance_id,
            HydratedInstance {
                class_hierarchy,
                field_values,
            },
        );
        self
    }

    #[must_use]
    pub fn with_object_array(mut self, array_id: ObjectId, element_ids: Vec<ObjectId>) -> Self {
        self.snapshot.metadata.insert(array_id, ObjectIdMetadata::ObjectArray);
        self.snapshot
            .records
            .insert(array_id, Record::ObjectArray(ObjectArrayRecord { array_id, element_ids }));
        self
    }

    #[must_use]
    pub fn with_primitive_array(
        mut self,
        array_id: ObjectId,
        kind: PrimitiveKind,
        length: u64,
    ) -> Self {
        self.snapshot
            .metadata
            .insert(array_id, ObjectIdMetadata::PrimitiveArrayOrWrapperArray);
        self.snapshot.records.insert(
            array_id,
            Record::PrimitiveArray(PrimitiveArrayRecord { array_id, kind, length }),
        );
        self
    }

    /// Tag `id` with a metadata kind without giving it a record — the shape
    /// the frontier's skip filter (spec §4.1) needs for ids such as strings
    /// and empty instances that the search never dispatches into.
    #[must_use]
    pub fn with_metadata(mut self, id: ObjectId, metadata: ObjectIdMetadata) -> Self {
        self.snapshot.metadata.insert(id, metadata);
        self
    }

    #[must_use]
    pub fn build(self) -> InMemorySnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_hydration_round_trips_through_the_parser_trait() {
        let instance_id = ObjectId::from(1);
        let class_id = ObjectId::from(2);
        let target = ObjectId::from(3);
        let snapshot = InMemorySnapshotBuilder::new()
            .with_class(class_id, "com.example.Holder", Vec::new(), 16)
            .with_instance(
                instance_id,
                class_id,
                vec![("com.example.Holder", vec![("value", HeapValue::Object(target))])],
            )
            .build();

        let Some(Record::Instance(record)) = snapshot.retrieve_record(instance_id) else {
            panic!("expected an instance record");
        };
        let hydrated = snapshot.hydrate_instance(&record);
        assert_eq!(hydrated.class_hierarchy.len(), 1);
        assert_eq!(hydrated.class_hierarchy[0].field_names, vec!["value"]);
        assert_eq!(hydrated.field_values[0], vec![HeapValue::Object(target)]);
    }

    #[test]
    fn unregistered_id_defaults_to_instance_metadata() {
        let snapshot = InMemorySnapshotBuilder::new().build();
        assert_eq!(
            snapshot.object_id_metadata(ObjectId::from(42)),
            ObjectIdMetadata::Instance
        );
        assert!(snapshot.retrieve_record(ObjectId::from(42)).is_none());
    }

    #[test]
    fn metadata_only_tag_has_no_backing_record() {
        let string_id = ObjectId::from(9);
        let snapshot = InMemorySnapshotBuilder::new()
            .with_metadata(string_id, ObjectIdMetadata::String)
            .build();
        assert_eq!(snapshot.object_id_metadata(string_id), ObjectIdMetadata::String);
        assert!(snapshot.retrieve_record(string_id).is_none());
    }
}
