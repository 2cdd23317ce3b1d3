pub mod hints;
pub mod image_seq;
pub mod log;
pub mod ser;
pub mod source;

pub use source::{Binarized, FrameSource};
