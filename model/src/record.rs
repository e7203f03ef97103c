//! The record kinds the visitor dispatches over (spec §4.3, §6).

use crate::ids::ObjectId;

/// A value read out of a field or array slot.
///
/// Primitive values carry no outbound reference and are never enqueued;
/// only `Object` values (including explicit nulls, `ObjectId::NULL`) are
/// candidates for traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapValue {
    Object(ObjectId),
    Primitive,
}

impl HeapValue {
    /// The referenced id, if this value is an object-typed field.
    #[must_use]
    pub fn as_object_id(self) -> Option<ObjectId> {
        match self {
            Self::Object(id) => Some(id),
            Self::Primitive => None,
        }
    }
}

/// A class dump: static fields only. Instance-field layout for instances of
/// this class is supplied separately via [`ClassInfo`] during hydration.
#[derive(Debug, Clone)]
pub struct ClassRecord {
    pub class_id: ObjectId,
    pub class_name: String,
    /// `(field_name, value)` pairs, snapshot order (not pre-sorted).
    pub static_fields: Vec<(String, HeapValue)>,
    /// Cumulative shallow size of an instance of this class, already
    /// summed over the class hierarchy by the parser.
    pub instance_size: u64,
}

/// An instance dump. Field layout is obtained separately via
/// `SnapshotParser::hydrate_instance` (spec §6) — this record carries only
/// enough identity to request that hydration.
#[derive(Debug, Clone, Copy)]
pub struct InstanceRecord {
    pub instance_id: ObjectId,
    pub class_id: ObjectId,
}

/// One level of an instance's class hierarchy, as seen by the hydrator.
#[derive(Debug, Clone)]
pub struct ClassInfo {
    pub class_name: String,
    pub field_names: Vec<String>,
}

/// The parallel-array result of hydrating an instance (spec §6):
/// `field_values[i][j]` corresponds to `class_hierarchy[i].field_names[j]`.
#[derive(Debug, Clone)]
pub struct HydratedInstance {
    pub class_hierarchy: Vec<ClassInfo>,
    pub field_values: Vec<Vec<HeapValue>>,
}

/// An object-array dump: ids only, nulls included (spec §4.3).
#[derive(Debug, Clone)]
pub struct ObjectArrayRecord {
    pub array_id: ObjectId,
    pub element_ids: Vec<ObjectId>,
}

/// Primitive element kind and its fixed byte width (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Float,
    Long,
    Double,
}

impl PrimitiveKind {
    /// Fixed byte width per the spec's primitive-size constants.
    #[must_use]
    pub fn byte_width(self) -> u64 {
        match self {
            Self::Boolean | Self::Byte => 1,
            Self::Short | Self::Char => 2,
            Self::Int | Self::Float => 4,
            Self::Long | Self::Double => 8,
        }
    }
}

/// A primitive-array dump: no outbound references, contributes only to
/// retained size (spec §4.3).
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveArrayRecord {
    pub array_id: ObjectId,
    pub kind: PrimitiveKind,
    pub length: u64,
}

impl PrimitiveArrayRecord {
    #[must_use]
    pub fn shallow_size(&self) -> u64 {
        self.length * self.kind.byte_width()
    }
}

/// The union of record kinds the parser can return for a given id.
///
/// The visitor (spec §4.3) handles three of these (`Class`, `Instance`,
/// `ObjectArray`); `PrimitiveArray` contributes only to retained-size
/// accounting and has no outbound references.
#[derive(Debug, Clone)]
pub enum Record {
    Class(ClassRecord),
    Instance(InstanceRecord),
    ObjectArray(ObjectArrayRecord),
    PrimitiveArray(PrimitiveArrayRecord),
}
