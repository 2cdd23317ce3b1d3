//! Sprocket-hole based frame alignment for scanned film.
//!
//! Each frame's binary perforation mask is compared against a reference
//! frame's mask to find the integer shift `(dx, dy)` that re-registers it.

pub mod align;
pub mod consts;
pub mod error;
pub mod frame;
pub mod io;
pub mod mask;
pub mod pipeline;

pub use error::{PerfPanError, Result};
pub use frame::{FrameAlignment, LimitFlags, MaskFrame, MaskView, OffsetOrigin, Shift};
pub use pipeline::{AlignConfig, PanEstimator};
