use std::path::{Path, PathBuf};

use ndarray::Array2;
use tracing::debug;

use crate::error::{PerfPanError, Result};
use crate::frame::MaskFrame;

use super::source::FrameSource;

const SEQUENCE_EXTENSIONS: &[&str] = &["png", "tif", "tiff", "bmp", "pgm"];

/// A directory of still images read as consecutive frames, sorted by file name.
pub struct ImageSequence {
    paths: Vec<PathBuf>,
}

impl ImageSequence {
    pub fn open(dir: &Path) -> Result<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_sequence_extension(p))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(PerfPanError::EmptySequence);
        }
        debug!(dir = %dir.display(), frames = paths.len(), "Opened image sequence");
        Ok(Self { paths })
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Result<Self> {
        if paths.is_empty() {
            return Err(PerfPanError::EmptySequence);
        }
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl FrameSource for ImageSequence {
    fn frame_count(&self) -> usize {
        self.paths.len()
    }

    /// Taken from the first file's header without decoding it.
    fn dimensions(&self) -> Result<(usize, usize)> {
        let path = self.paths.first().ok_or(PerfPanError::EmptySequence)?;
        let (w, h) = image::image_dimensions(path)?;
        Ok((w as usize, h as usize))
    }

    fn read_mask(&self, index: usize) -> Result<MaskFrame> {
        let path = self
            .paths
            .get(index)
            .ok_or(PerfPanError::FrameIndexOutOfRange {
                index,
                total: self.paths.len(),
            })?;
        load_mask_image(path)
    }
}

/// Load an image file as 8-bit luma.
pub fn load_mask_image(path: &Path) -> Result<MaskFrame> {
    let gray = image::open(path)?.to_luma8();
    let (w, h) = gray.dimensions();
    let data = Array2::from_shape_vec((h as usize, w as usize), gray.into_raw())
        .map_err(|_| PerfPanError::InvalidDimensions {
            width: w,
            height: h,
        })?;
    Ok(MaskFrame::new(data))
}

fn has_sequence_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SEQUENCE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
