use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerfPanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open {}: {source}", path.display())]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Clip must be black and white: sample {value} at ({x}, {y}). \
         Binarize the mask before alignment"
    )]
    InvalidPixelFormat { x: usize, y: usize, value: u8 },

    #[error("Malformed hint line {line}: {reason}")]
    MalformedHintLine { line: usize, reason: String },

    #[error("Frame geometry mismatch: reference {ref_width}x{ref_height}, current {cur_width}x{cur_height}")]
    GeometryMismatch {
        ref_width: usize,
        ref_height: usize,
        cur_width: usize,
        cur_height: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid SER file: {0}")]
    InvalidSer(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Empty frame sequence")]
    EmptySequence,
}

pub type Result<T> = std::result::Result<T, PerfPanError>;
