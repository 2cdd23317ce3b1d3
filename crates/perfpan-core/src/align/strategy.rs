use crate::consts::EXHAUSTIVE_MAX_SEARCH;
use crate::error::{PerfPanError, Result};
use crate::frame::ShiftBounds;

use super::comparator::{MaskComparator, SearchResult};
use super::exhaustive::{search_exhaustive, ExhaustiveSweep};
use super::gradient::{search_gradient, RingSearchStats};
use super::scoring::ScoringPolicy;

/// How the space of candidate shifts is explored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Score every valid shift.
    Exhaustive,
    /// Ring search bounded by `max_radius`.
    Gradient { max_radius: u32 },
}

impl SearchStrategy {
    /// Map the `max_search` option: -1 selects exhaustive, 0 and above a
    /// bounded ring search.
    pub fn from_max_search(max_search: i32) -> Result<Self> {
        match max_search {
            EXHAUSTIVE_MAX_SEARCH => Ok(Self::Exhaustive),
            r if r >= 0 => Ok(Self::Gradient {
                max_radius: r as u32,
            }),
            other => Err(PerfPanError::InvalidConfig(format!(
                "max_search must be -1 or non-negative, got {other}"
            ))),
        }
    }

    pub fn max_search(&self) -> i32 {
        match self {
            Self::Exhaustive => EXHAUSTIVE_MAX_SEARCH,
            Self::Gradient { max_radius } => *max_radius as i32,
        }
    }

    /// Scoring convention paired with each strategy generation.
    pub fn default_scoring(&self) -> ScoringPolicy {
        match self {
            Self::Exhaustive => ScoringPolicy::MismatchRatio,
            Self::Gradient { .. } => ScoringPolicy::WeightedAgreement,
        }
    }
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhaustive => write!(f, "Exhaustive"),
            Self::Gradient { max_radius } => write!(f, "Gradient (radius {})", max_radius),
        }
    }
}

/// What a strategy produced besides the best result.
#[derive(Clone, Debug)]
pub enum SearchTrace {
    Exhaustive(ExhaustiveSweep),
    Gradient(RingSearchStats),
}

/// Outcome of one frame's search.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub result: SearchResult,
    pub bounds: ShiftBounds,
    pub trace: SearchTrace,
    /// Candidates actually computed.
    pub evaluations: usize,
    /// Candidates served from the score cache.
    pub cache_hits: usize,
}

/// Run the given strategy to completion and collect its result.
pub fn run_search(
    mut comparator: MaskComparator<'_>,
    strategy: SearchStrategy,
) -> Result<SearchOutcome> {
    let bounds = comparator.bounds();
    let trace = match strategy {
        SearchStrategy::Exhaustive => SearchTrace::Exhaustive(search_exhaustive(&mut comparator)?),
        SearchStrategy::Gradient { max_radius } => {
            SearchTrace::Gradient(search_gradient(&mut comparator, max_radius)?)
        }
    };
    let evaluations = comparator.evaluations();
    let cache_hits = comparator.cache().hits();
    Ok(SearchOutcome {
        result: comparator.into_result(),
        bounds,
        trace,
        evaluations,
        cache_hits,
    })
}
