use ndarray::{Array2, ArrayView2, ShapeBuilder};

use crate::error::{PerfPanError, Result};

/// An owned binary mask frame.
/// Samples are expected to be exactly 0 (black) or 255 (white).
#[derive(Clone, Debug)]
pub struct MaskFrame {
    /// Sample data, row-major, shape = (height, width)
    pub data: Array2<u8>,
}

impl MaskFrame {
    pub fn new(data: Array2<u8>) -> Self {
        Self { data }
    }

    /// Copy a pitched raw buffer into an owned frame.
    pub fn from_pitched(data: &[u8], width: usize, height: usize, pitch: usize) -> Result<Self> {
        let view = MaskView::from_pitched(data, width, height, pitch)?;
        Ok(Self::new(view.data.to_owned()))
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn view(&self) -> MaskView<'_> {
        MaskView {
            data: self.data.view(),
        }
    }
}

/// A borrowed, read-only mask buffer. The row stride may exceed the width.
#[derive(Clone, Copy, Debug)]
pub struct MaskView<'a> {
    pub data: ArrayView2<'a, u8>,
}

impl<'a> MaskView<'a> {
    pub fn new(data: ArrayView2<'a, u8>) -> Self {
        Self { data }
    }

    /// View a raw buffer whose rows are `pitch` bytes apart.
    pub fn from_pitched(data: &'a [u8], width: usize, height: usize, pitch: usize) -> Result<Self> {
        if width == 0 || height == 0 || pitch < width {
            return Err(PerfPanError::InvalidDimensions {
                width: width as u32,
                height: height as u32,
            });
        }
        let view = ArrayView2::from_shape((height, width).strides((pitch, 1)), data).map_err(
            |_| PerfPanError::InvalidDimensions {
                width: width as u32,
                height: height as u32,
            },
        )?;
        Ok(Self { data: view })
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Candidate displacement of the current frame relative to the reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shift {
    pub x: i32,
    pub y: i32,
}

impl Shift {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Exclusive shift bounds derived from the frame geometry.
///
/// A candidate is valid when `min_x < x < max_x` and `min_y < y < max_y`,
/// with `max_x = width / 4` and `max_y = height / 4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShiftBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl ShiftBounds {
    pub fn for_frame(width: usize, height: usize) -> Self {
        let qx = (width / 4) as i32;
        let qy = (height / 4) as i32;
        Self {
            min_x: -qx,
            max_x: qx,
            min_y: -qy,
            max_y: qy,
        }
    }

    pub fn contains(&self, shift: Shift) -> bool {
        shift.x > self.min_x && shift.x < self.max_x && shift.y > self.min_y && shift.y < self.max_y
    }

    /// Number of valid columns and rows of candidates.
    pub fn grid_size(&self) -> (usize, usize) {
        let cols = (self.max_x - self.min_x - 1).max(0) as usize;
        let rows = (self.max_y - self.min_y - 1).max(0) as usize;
        (cols, rows)
    }

    /// Flags for a shift sitting one unit inside (or beyond) a bound.
    pub fn limit_flags(&self, shift: Shift) -> LimitFlags {
        let mut flags = LimitFlags::NONE;
        if shift.x <= self.min_x + 1 {
            flags |= LimitFlags::AT_MIN_X;
        }
        if shift.x >= self.max_x - 1 {
            flags |= LimitFlags::AT_MAX_X;
        }
        if shift.y <= self.min_y + 1 {
            flags |= LimitFlags::AT_MIN_Y;
        }
        if shift.y >= self.max_y - 1 {
            flags |= LimitFlags::AT_MAX_Y;
        }
        flags
    }
}

/// Bitset marking which search bounds a final shift landed against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LimitFlags(u8);

impl LimitFlags {
    pub const NONE: Self = Self(0);
    pub const AT_MIN_X: Self = Self(1);
    pub const AT_MAX_X: Self = Self(2);
    pub const AT_MIN_Y: Self = Self(4);
    pub const AT_MAX_Y: Self = Self(8);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0f)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for LimitFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for LimitFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::fmt::Display for LimitFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let names = [
            (Self::AT_MIN_X, "min-x"),
            (Self::AT_MAX_X, "max-x"),
            (Self::AT_MIN_Y, "min-y"),
            (Self::AT_MAX_Y, "max-y"),
        ];
        let parts: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Where a frame's stored offset came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffsetOrigin {
    /// Pre-seeded from a hint file.
    Hint,
    /// Computed by a search for this frame.
    Search,
    /// Copied from the preceding frame because the search hit a bound.
    CopiedOnLimit,
}

impl std::fmt::Display for OffsetOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hint => write!(f, "hint"),
            Self::Search => write!(f, "search"),
            Self::CopiedOnLimit => write!(f, "copied"),
        }
    }
}

/// Final alignment of one frame against the reference frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameAlignment {
    pub frame: usize,
    pub dx: i32,
    pub dy: i32,
    /// Best match score, `None` when every candidate was rejected as blank
    /// or the hint carried no score.
    pub score: Option<f64>,
    pub limit: LimitFlags,
    pub origin: OffsetOrigin,
}

impl FrameAlignment {
    pub fn shift(&self) -> Shift {
        Shift::new(self.dx, self.dy)
    }
}
