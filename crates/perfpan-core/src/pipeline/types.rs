/// Progress reporting for an alignment run.
///
/// Implementors can use this to drive progress bars or logging. All methods
/// have default no-op implementations.
pub trait ProgressReporter {
    /// The run has started. `total_frames` is the number of frames to align.
    fn begin(&self, _total_frames: usize) {}

    /// One frame has been aligned.
    fn advance(&self, _frames_done: usize) {}

    /// The run is finished.
    fn finish(&self) {}
}

/// No-op progress reporter, used when `run_alignment` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
