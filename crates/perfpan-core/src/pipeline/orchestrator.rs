use std::ops::Range;

use tracing::info;

use crate::error::{PerfPanError, Result};
use crate::frame::FrameAlignment;
use crate::io::FrameSource;

use super::session::PanEstimator;
use super::types::{NoOpReporter, ProgressReporter};

/// Align every frame in `frames` in increasing order, reporting progress.
///
/// The first error aborts the run; frames aligned before it stay in the
/// estimator's store and log.
pub fn run_alignment_reported<S>(
    source: &S,
    estimator: &mut PanEstimator,
    frames: Range<usize>,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<FrameAlignment>>
where
    S: FrameSource + ?Sized,
{
    let total = source.frame_count();
    if total == 0 {
        return Err(PerfPanError::EmptySequence);
    }
    let reference = estimator.config().reference_frame;
    if reference >= total {
        return Err(PerfPanError::FrameIndexOutOfRange {
            index: reference,
            total,
        });
    }
    let frames = frames.start.min(total)..frames.end.min(total);

    info!(
        total_frames = total,
        first = frames.start,
        end = frames.end,
        "Aligning frames"
    );

    reporter.begin(frames.len());
    let reference_mask = source.read_mask(reference)?;
    let mut results = Vec::with_capacity(frames.len());
    for (done, frame) in frames.enumerate() {
        let alignment = match estimator.stored(frame) {
            Some(stored) => stored,
            None => {
                let current = source.read_mask(frame)?;
                estimator.align_masks(frame, reference_mask.view(), current.view())?
            }
        };
        results.push(alignment);
        reporter.advance(done + 1);
    }
    reporter.finish();

    info!(
        aligned = results.len(),
        searched = estimator.searches_run(),
        "Alignment complete"
    );
    Ok(results)
}

/// Align every frame of `source`.
pub fn run_alignment<S>(source: &S, estimator: &mut PanEstimator) -> Result<Vec<FrameAlignment>>
where
    S: FrameSource + ?Sized,
{
    run_alignment_reported(source, estimator, 0..source.frame_count(), &NoOpReporter)
}
