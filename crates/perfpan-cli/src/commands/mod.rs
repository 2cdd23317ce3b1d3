pub mod align;
pub mod config;
pub mod info;

use std::path::Path;

use anyhow::{Context, Result};
use perfpan_core::io::image_seq::ImageSequence;
use perfpan_core::io::ser::SerReader;
use perfpan_core::io::FrameSource;

/// Open a SER clip, or a directory of still images as one clip.
pub fn open_source(path: &Path) -> Result<Box<dyn FrameSource>> {
    if path.is_dir() {
        let seq = ImageSequence::open(path)
            .with_context(|| format!("Failed to read image sequence {}", path.display()))?;
        Ok(Box::new(seq))
    } else {
        let reader = SerReader::open(path)
            .with_context(|| format!("Failed to open SER file {}", path.display()))?;
        Ok(Box::new(reader))
    }
}
