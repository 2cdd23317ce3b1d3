pub mod config;
mod orchestrator;
mod session;
pub mod store;
mod types;

pub use config::AlignConfig;
pub use orchestrator::{run_alignment, run_alignment_reported};
pub use session::{AlignmentSession, PanEstimator};
pub use store::{FrameOffsetStore, StoredOffset};
pub use types::ProgressReporter;
