//! Fire-and-forget progress notification (spec §5, §6).

/// A phase of `find_paths` (spec §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStep {
    FindingShortestPaths,
    FindingDominators,
    CalculatingRetainedSize,
}

/// Single-method progress sink. The listener must not call back into the
/// analyzer (spec §5) — `find_paths` is non-reentrant.
pub trait ProgressListener {
    fn on_progress_update(&self, step: ProgressStep);
}

/// A listener that discards every update. The default for callers that
/// don't care about progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgressListener;

impl ProgressListener for NoopProgressListener {
    fn on_progress_update(&self, _step: ProgressStep) {}
}
