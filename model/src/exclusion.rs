//! Exclusion policy types: the priority order used by the frontier queue.

/// Ordered exclusion priority. Lower variants sort first (derived `Ord`
/// follows declaration order): `AlwaysReachable < WeaklyReachable <
/// NeverReachable`.
///
/// `AlwaysReachable` doubles as the sentinel for "no exclusion applies to
/// this edge" (spec §3); `NeverReachable` edges are dropped before they ever
/// reach the frontier (spec §4.1), so the two can never be confused in
/// practice even though they would otherwise collide as a shared sentinel
/// (spec §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExclusionStatus {
    AlwaysReachable,
    WeaklyReachable,
    NeverReachable,
}

/// A single exclusion rule: a status plus a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub status: ExclusionStatus,
    pub description: String,
}

impl Exclusion {
    #[must_use]
    pub fn new(status: ExclusionStatus, description: impl Into<String>) -> Self {
        Self {
            status,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_spec() {
        assert!(ExclusionStatus::AlwaysReachable < ExclusionStatus::WeaklyReachable);
        assert!(ExclusionStatus::WeaklyReachable < ExclusionStatus::NeverReachable);
    }
}
