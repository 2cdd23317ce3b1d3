use crate::error::{PerfPanError, Result};
use crate::frame::MaskFrame;
use crate::mask::{binarize, Threshold};

/// Random-access supplier of mask frames.
pub trait FrameSource {
    fn frame_count(&self) -> usize;

    /// Frame `(width, height)` shared by every frame of the source.
    fn dimensions(&self) -> Result<(usize, usize)>;

    /// Read frame `index` as an 8-bit mask.
    fn read_mask(&self, index: usize) -> Result<MaskFrame>;
}

impl FrameSource for [MaskFrame] {
    fn frame_count(&self) -> usize {
        self.len()
    }

    fn dimensions(&self) -> Result<(usize, usize)> {
        self.first()
            .map(|f| (f.width(), f.height()))
            .ok_or(PerfPanError::EmptySequence)
    }

    fn read_mask(&self, index: usize) -> Result<MaskFrame> {
        self.get(index)
            .cloned()
            .ok_or(PerfPanError::FrameIndexOutOfRange {
                index,
                total: self.len(),
            })
    }
}

impl FrameSource for Vec<MaskFrame> {
    fn frame_count(&self) -> usize {
        self.as_slice().frame_count()
    }

    fn dimensions(&self) -> Result<(usize, usize)> {
        self.as_slice().dimensions()
    }

    fn read_mask(&self, index: usize) -> Result<MaskFrame> {
        self.as_slice().read_mask(index)
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn frame_count(&self) -> usize {
        (**self).frame_count()
    }

    fn dimensions(&self) -> Result<(usize, usize)> {
        (**self).dimensions()
    }

    fn read_mask(&self, index: usize) -> Result<MaskFrame> {
        (**self).read_mask(index)
    }
}

/// Adapter that thresholds every frame of another source to {0, 255}.
pub struct Binarized<S> {
    inner: S,
    threshold: Threshold,
}

impl<S: FrameSource> Binarized<S> {
    pub fn new(inner: S, threshold: Threshold) -> Self {
        Self { inner, threshold }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: FrameSource> FrameSource for Binarized<S> {
    fn frame_count(&self) -> usize {
        self.inner.frame_count()
    }

    fn dimensions(&self) -> Result<(usize, usize)> {
        self.inner.dimensions()
    }

    fn read_mask(&self, index: usize) -> Result<MaskFrame> {
        let frame = self.inner.read_mask(index)?;
        Ok(binarize(&frame, &self.threshold))
    }
}
