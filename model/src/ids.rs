//! Object identity and snapshot-provided kind tags.

/// A 64-bit object identifier from the heap snapshot.
///
/// `ObjectId::NULL` (value `0`) is never enqueued by the frontier and never
/// denotes a live object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// The null id. Never enqueued, never a valid retaining-path node.
    pub const NULL: Self = Self(0);

    /// Whether this id is the null id.
    #[must_use]
    pub fn is_null(self) -> bool {
        self == Self::NULL
    }
}

impl From<u64> for ObjectId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot-provided tag for an id, used by the frontier's skip filter.
///
/// The analyzer consumes this tag but never computes it — it is always
/// supplied by the external parser (spec §3, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectIdMetadata {
    Class,
    Instance,
    ObjectArray,
    PrimitiveArrayOrWrapperArray,
    PrimitiveWrapper,
    String,
    EmptyInstance,
}

impl ObjectIdMetadata {
    /// Whether this metadata tag marks an id as "uninteresting" and subject
    /// to the frontier's skip filter (spec §4.1), unless the id is itself a
    /// leaking candidate.
    #[must_use]
    pub fn is_skippable(self) -> bool {
        matches!(
            self,
            Self::PrimitiveWrapper
                | Self::PrimitiveArrayOrWrapperArray
                | Self::String
                | Self::EmptyInstance
        )
    }
}
