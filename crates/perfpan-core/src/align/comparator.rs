//! Binary mask comparison under a candidate shift.
//!
//! The current frame is translated by `(x, y)` and overlaid on the reference
//! frame. Only the overlapping region, `(w - |x|) x (h - |y|)`, is compared.
//! Regions that are almost entirely black or white carry no alignment signal
//! and are rejected with a sentinel score instead of an error.

use ndarray::{s, ArrayView1, ArrayView2};
use rayon::prelude::*;
use tracing::trace;

use crate::consts::{MASK_BLACK, MASK_WHITE, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{PerfPanError, Result};
use crate::frame::{MaskView, Shift, ShiftBounds};

use super::cache::ScoreCache;
use super::scoring::{Score, ScoringPolicy};

/// Best candidate seen so far in one frame's search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    pub shift: Shift,
    pub score: f64,
    /// Whether any real score has been accepted.
    pub accepted: bool,
}

impl SearchResult {
    pub fn initial(policy: ScoringPolicy) -> Self {
        Self {
            shift: Shift::default(),
            score: policy.worst(),
            accepted: false,
        }
    }

    /// The best score, or `None` if nothing beat the initial worst score.
    pub fn best_score(&self) -> Score {
        self.accepted.then_some(self.score)
    }
}

/// Pixel counts over one overlap region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Tally {
    reference_blacks: u64,
    reference_whites: u64,
    current_blacks: u64,
    current_whites: u64,
    mismatches: u64,
    weighted: i64,
    total: u64,
}

impl Tally {
    fn merge(self, other: Self) -> Self {
        Self {
            reference_blacks: self.reference_blacks + other.reference_blacks,
            reference_whites: self.reference_whites + other.reference_whites,
            current_blacks: self.current_blacks + other.current_blacks,
            current_whites: self.current_whites + other.current_whites,
            mismatches: self.mismatches + other.mismatches,
            weighted: self.weighted + other.weighted,
            total: self.total + other.total,
        }
    }

    /// Every color count must exceed `trunc(total * blank_threshold)`.
    fn is_blank(&self, blank_threshold: f64) -> bool {
        let threshold = (self.total as f64 * blank_threshold) as u64;
        !(self.current_blacks > threshold
            && self.current_whites > threshold
            && self.reference_blacks > threshold
            && self.reference_whites > threshold)
    }

    fn score(&self, policy: ScoringPolicy) -> f64 {
        let total = self.total as f64;
        match policy {
            ScoringPolicy::MismatchRatio => self.mismatches as f64 / total,
            ScoringPolicy::WeightedAgreement => self.weighted as f64 / total,
        }
    }
}

/// Origins of the overlap window in both frames.
#[derive(Clone, Copy, Debug)]
struct Overlap {
    reference_row: usize,
    reference_col: usize,
    current_row: usize,
    current_col: usize,
    rows: usize,
    cols: usize,
}

impl Overlap {
    fn for_shift(shift: Shift, width: usize, height: usize) -> Self {
        let ax = shift.x.unsigned_abs() as usize;
        let ay = shift.y.unsigned_abs() as usize;
        Self {
            reference_row: if shift.y > 0 { ay } else { 0 },
            reference_col: if shift.x > 0 { ax } else { 0 },
            current_row: if shift.y > 0 { 0 } else { ay },
            current_col: if shift.x > 0 { 0 } else { ax },
            rows: height - ay,
            cols: width - ax,
        }
    }
}

/// Scores candidate shifts between a reference and a current mask.
///
/// Owns the per-frame [`ScoreCache`] and the running [`SearchResult`]; both
/// live exactly as long as one frame's search.
pub struct MaskComparator<'a> {
    reference: ArrayView2<'a, u8>,
    current: ArrayView2<'a, u8>,
    bounds: ShiftBounds,
    policy: ScoringPolicy,
    blank_threshold: f64,
    cache: ScoreCache,
    best: SearchResult,
    evaluations: usize,
}

impl<'a> MaskComparator<'a> {
    pub fn new(
        reference: MaskView<'a>,
        current: MaskView<'a>,
        policy: ScoringPolicy,
        blank_threshold: f64,
    ) -> Result<Self> {
        check_geometry(&reference, &current)?;
        let bounds = ShiftBounds::for_frame(reference.width(), reference.height());
        Ok(Self {
            reference: reference.data,
            current: current.data,
            bounds,
            policy,
            blank_threshold,
            cache: ScoreCache::new(),
            best: SearchResult::initial(policy),
            evaluations: 0,
        })
    }

    pub fn bounds(&self) -> ShiftBounds {
        self.bounds
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    pub fn best(&self) -> &SearchResult {
        &self.best
    }

    pub fn cache(&self) -> &ScoreCache {
        &self.cache
    }

    /// Number of candidates actually computed (cache misses within bounds).
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn into_result(self) -> SearchResult {
        self.best
    }

    /// Score one candidate shift, updating the best result on improvement.
    ///
    /// Returns `Ok(None)` for out-of-bounds or blank candidates, and
    /// `InvalidPixelFormat` if a compared sample is neither 0 nor 255.
    pub fn score(&mut self, shift: Shift) -> Result<Score> {
        if !self.bounds.contains(shift) {
            return Ok(None);
        }
        if let Some(cached) = self.cache.get(shift) {
            return Ok(cached);
        }

        let tally = tally_overlap(self.reference, self.current, shift)?;
        self.evaluations += 1;

        let score = if tally.is_blank(self.blank_threshold) {
            None
        } else {
            Some(tally.score(self.policy))
        };

        if let Some(value) = score {
            if self.policy.is_better(value, self.best.score) {
                trace!(x = shift.x, y = shift.y, score = value, "New best shift");
                self.best = SearchResult {
                    shift,
                    score: value,
                    accepted: true,
                };
            }
        }

        self.cache.insert(shift, score);
        Ok(score)
    }
}

/// Raw overlap score of one shift, without bounds, blank rejection or
/// caching. Both views must share the same geometry and the shift must
/// leave a non-empty overlap.
pub fn overlap_score(
    reference: MaskView<'_>,
    current: MaskView<'_>,
    shift: Shift,
    policy: ScoringPolicy,
) -> Result<f64> {
    check_geometry(&reference, &current)?;
    let (h, w) = reference.data.dim();
    if shift.x.unsigned_abs() as usize >= w || shift.y.unsigned_abs() as usize >= h {
        return Err(PerfPanError::InvalidDimensions {
            width: w as u32,
            height: h as u32,
        });
    }
    Ok(tally_overlap(reference.data, current.data, shift)?.score(policy))
}

fn check_geometry(reference: &MaskView<'_>, current: &MaskView<'_>) -> Result<()> {
    if reference.data.dim() != current.data.dim() {
        return Err(PerfPanError::GeometryMismatch {
            ref_width: reference.width(),
            ref_height: reference.height(),
            cur_width: current.width(),
            cur_height: current.height(),
        });
    }
    Ok(())
}

fn tally_overlap(
    reference: ArrayView2<'_, u8>,
    current: ArrayView2<'_, u8>,
    shift: Shift,
) -> Result<Tally> {
    let (h, w) = reference.dim();
    let o = Overlap::for_shift(shift, w, h);
    let reference = reference.slice(s![
        o.reference_row..o.reference_row + o.rows,
        o.reference_col..o.reference_col + o.cols
    ]);
    let current = current.slice(s![
        o.current_row..o.current_row + o.rows,
        o.current_col..o.current_col + o.cols
    ]);

    let row_tally = |row: usize| tally_row(reference.row(row), current.row(row), &o, row);

    if o.rows * o.cols >= PARALLEL_PIXEL_THRESHOLD {
        (0..o.rows)
            .into_par_iter()
            .map(row_tally)
            .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))
    } else {
        let mut acc = Tally::default();
        for row in 0..o.rows {
            acc = acc.merge(row_tally(row)?);
        }
        Ok(acc)
    }
}

fn tally_row(
    reference: ArrayView1<'_, u8>,
    current: ArrayView1<'_, u8>,
    o: &Overlap,
    row: usize,
) -> Result<Tally> {
    let mut t = Tally::default();
    for (col, (&r, &c)) in reference.iter().zip(current.iter()).enumerate() {
        let reference_white = classify(r, o.reference_col + col, o.reference_row + row)?;
        let current_white = classify(c, o.current_col + col, o.current_row + row)?;

        if reference_white {
            t.reference_whites += 1;
        } else {
            t.reference_blacks += 1;
        }
        if current_white {
            t.current_whites += 1;
        } else {
            t.current_blacks += 1;
        }
        if reference_white != current_white {
            t.mismatches += 1;
        }
        t.weighted += ScoringPolicy::pair_weight(reference_white, current_white);
        t.total += 1;
    }
    Ok(t)
}

/// `true` for white, `false` for black, error for anything else.
fn classify(value: u8, x: usize, y: usize) -> Result<bool> {
    match value {
        MASK_WHITE => Ok(true),
        MASK_BLACK => Ok(false),
        _ => Err(PerfPanError::InvalidPixelFormat { x, y, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_positive_shift_skips_reference_origin() {
        let o = Overlap::for_shift(Shift::new(3, 2), 20, 10);
        assert_eq!((o.reference_col, o.reference_row), (3, 2));
        assert_eq!((o.current_col, o.current_row), (0, 0));
        assert_eq!((o.cols, o.rows), (17, 8));
    }

    #[test]
    fn overlap_negative_shift_skips_current_origin() {
        let o = Overlap::for_shift(Shift::new(-4, -1), 20, 10);
        assert_eq!((o.reference_col, o.reference_row), (0, 0));
        assert_eq!((o.current_col, o.current_row), (4, 1));
        assert_eq!((o.cols, o.rows), (16, 9));
    }

    #[test]
    fn blank_threshold_is_truncated_and_strict() {
        // 250 * 0.01 = 2.5 truncates to 2, so a count of 3 passes and 2 fails.
        let mut t = Tally {
            reference_blacks: 247,
            reference_whites: 3,
            current_blacks: 247,
            current_whites: 3,
            mismatches: 0,
            weighted: 0,
            total: 250,
        };
        assert!(!t.is_blank(0.01));
        t.reference_whites = 2;
        t.reference_blacks = 248;
        assert!(t.is_blank(0.01));
    }
}
