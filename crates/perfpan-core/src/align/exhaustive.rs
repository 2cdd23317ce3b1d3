use ndarray::Array2;

use crate::error::Result;
use crate::frame::Shift;

use super::comparator::MaskComparator;

/// Every score of a full grid sweep, for diagnostic plotting.
#[derive(Clone, Debug)]
pub struct ExhaustiveSweep {
    /// Shift of the grid cell `[0, 0]`.
    pub origin: Shift,
    /// Scores indexed `[row, col]` = `[y - origin.y, x - origin.x]`.
    /// Rejected candidates are NaN.
    pub scores: Array2<f64>,
    /// Lowest real score seen.
    pub min_score: Option<f64>,
    /// Highest real score seen.
    pub max_score: Option<f64>,
}

impl ExhaustiveSweep {
    pub fn shift_at(&self, row: usize, col: usize) -> Shift {
        Shift::new(self.origin.x + col as i32, self.origin.y + row as i32)
    }
}

/// Score every shift strictly inside the comparator's bounds, row-major.
///
/// Costs one full overlap comparison per candidate; intended for small
/// frames or offline analysis.
pub fn search_exhaustive(comparator: &mut MaskComparator<'_>) -> Result<ExhaustiveSweep> {
    let bounds = comparator.bounds();
    let (cols, rows) = bounds.grid_size();
    let origin = Shift::new(bounds.min_x + 1, bounds.min_y + 1);
    let mut scores = Array2::<f64>::from_elem((rows, cols), f64::NAN);
    let mut min_score: Option<f64> = None;
    let mut max_score: Option<f64> = None;

    for row in 0..rows {
        for col in 0..cols {
            let shift = Shift::new(origin.x + col as i32, origin.y + row as i32);
            if let Some(value) = comparator.score(shift)? {
                scores[[row, col]] = value;
                min_score = Some(min_score.map_or(value, |m| m.min(value)));
                max_score = Some(max_score.map_or(value, |m| m.max(value)));
            }
        }
    }

    Ok(ExhaustiveSweep {
        origin,
        scores,
        min_score,
        max_score,
    })
}
