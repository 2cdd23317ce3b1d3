//! Adaptive ring search.
//!
//! Hill-climbs from `(0, 0)`: evaluates the square ring of Chebyshev radius
//! `r` around the current center, snaps the center to any improvement and
//! restarts at `r = 1`, otherwise widens the ring up to `max_radius`. It can
//! settle in a local optimum when the score surface is not unimodal.

use tracing::trace;

use crate::error::Result;
use crate::frame::Shift;

use super::comparator::MaskComparator;

/// Counters describing how a ring search went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RingSearchStats {
    /// Number of rings evaluated.
    pub rings: usize,
    /// Number of times the center moved to a better shift.
    pub recenterings: usize,
}

/// Points on the square ring of radius `r` around `center`.
///
/// Top and bottom rows span the full width; the left and right columns
/// exclude the corners already covered. Yields `8 * r` points for `r > 0`.
pub fn ring_points(center: Shift, r: i32) -> impl Iterator<Item = Shift> {
    let top = (-r..=r).map(move |dx| Shift::new(center.x + dx, center.y - r));
    let bottom = (-r..=r).map(move |dx| Shift::new(center.x + dx, center.y + r));
    let sides = (-r + 1..r).flat_map(move |dy| {
        [
            Shift::new(center.x - r, center.y + dy),
            Shift::new(center.x + r, center.y + dy),
        ]
    });
    top.chain(bottom).chain(sides)
}

/// Run the ring search. The comparator's best result holds the answer.
pub fn search_gradient(
    comparator: &mut MaskComparator<'_>,
    max_radius: u32,
) -> Result<RingSearchStats> {
    let max_radius = max_radius as i32;
    let mut stats = RingSearchStats::default();
    let mut center = Shift::default();
    comparator.score(center)?;

    let mut r = 1;
    while r <= max_radius {
        for point in ring_points(center, r) {
            comparator.score(point)?;
        }
        stats.rings += 1;

        let best = comparator.best().shift;
        if best != center {
            trace!(from = %center, to = %best, radius = r, "Ring search moved");
            center = best;
            stats.recenterings += 1;
            r = 1;
        } else {
            r += 1;
        }
    }

    Ok(stats)
}
