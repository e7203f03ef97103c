//! Typed analyzer errors (spec §7).

use retainer_model::ObjectId;

/// Fatal failure of `find_paths`. Both variants indicate parser/analyzer
/// disagreement or an internal bug, never a property of the input data
/// itself — `find_paths` returns `Err` without any partial results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    /// Raised during retained-size accounting when a dominated id's record
    /// is not one of the four kinds the parser contract allows.
    MalformedRecord { object_id: ObjectId, detail: String },

    /// Raised when `update_dominator` cannot find a dominator for `parent`
    /// though the invariant guarantees `parent` was already visited and is
    /// therefore either dominated or in the undominated set.
    DominatorInvariantViolation { child: ObjectId, parent: ObjectId },
}

impl std::fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRecord { object_id, detail } => {
                write!(f, "malformed record for {object_id}: {detail}")
            }
            Self::DominatorInvariantViolation { child, parent } => write!(
                f,
                "dominator invariant violation: parent {parent} of child {child} has no dominator and is not undominated"
            ),
        }
    }
}

impl std::error::Error for AnalyzerError {}
