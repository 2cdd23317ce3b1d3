use serde::{Deserialize, Serialize};

use crate::consts::{WEIGHT_BLACK_MATCH, WEIGHT_BLACK_MISS, WEIGHT_WHITE_MATCH, WEIGHT_WHITE_MISS};

/// Match quality of one candidate shift. `None` means the candidate was not
/// evaluated (out of bounds) or was rejected as blank.
pub type Score = Option<f64>;

/// How a pair of overlapping masks is turned into a single score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringPolicy {
    /// Fraction of differing pixels. Lower is better, range [0, 1].
    MismatchRatio,
    /// Asymmetric per-pixel weights favouring white (hole) agreement.
    /// Higher is better, range [-20, 20].
    WeightedAgreement,
}

impl ScoringPolicy {
    /// Score a search result starts from before any candidate is accepted.
    pub fn worst(self) -> f64 {
        match self {
            Self::MismatchRatio => 1.0,
            Self::WeightedAgreement => WEIGHT_WHITE_MISS as f64,
        }
    }

    /// Strict improvement test.
    pub fn is_better(self, candidate: f64, best: f64) -> bool {
        match self {
            Self::MismatchRatio => candidate < best,
            Self::WeightedAgreement => candidate > best,
        }
    }

    /// Weight of one (reference, current) pixel pair under weighted agreement.
    /// Both samples must already be validated as 0 or 255.
    pub(crate) fn pair_weight(reference_white: bool, current_white: bool) -> i64 {
        match (reference_white, current_white) {
            (true, true) => WEIGHT_WHITE_MATCH,
            (true, false) => WEIGHT_WHITE_MISS,
            (false, false) => WEIGHT_BLACK_MATCH,
            (false, true) => WEIGHT_BLACK_MISS,
        }
    }
}

impl std::fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MismatchRatio => write!(f, "Mismatch Ratio"),
            Self::WeightedAgreement => write!(f, "Weighted Agreement"),
        }
    }
}
