//! Upstream binarization of 8-bit frames into {0, 255} masks.

pub mod threshold;

use crate::consts::{MASK_BLACK, MASK_WHITE};
use crate::frame::MaskFrame;

pub use threshold::otsu_level;

/// How the binarization level is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threshold {
    /// Samples at or above the level become white.
    Fixed(u8),
    /// Per-frame level from Otsu's method.
    Otsu,
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(level) => write!(f, "Fixed ({})", level),
            Self::Otsu => write!(f, "Otsu"),
        }
    }
}

/// Threshold a frame into a binary mask.
pub fn binarize(frame: &MaskFrame, threshold: &Threshold) -> MaskFrame {
    let level = match threshold {
        Threshold::Fixed(level) => *level,
        Threshold::Otsu => otsu_level(&frame.data),
    };
    MaskFrame::new(
        frame
            .data
            .mapv(|v| if v >= level { MASK_WHITE } else { MASK_BLACK }),
    )
}

/// Whether every sample is exactly black or white.
pub fn is_binary(frame: &MaskFrame) -> bool {
    frame
        .data
        .iter()
        .all(|&v| v == MASK_BLACK || v == MASK_WHITE)
}
