/// Minimum overlap pixel count (h*w) to tally comparator rows with Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Sample value of a black mask pixel.
pub const MASK_BLACK: u8 = 0;

/// Sample value of a white mask pixel.
pub const MASK_WHITE: u8 = 255;

/// Default fraction of overlap pixels at or below which a color count marks
/// the compared region as blank.
pub const DEFAULT_BLANK_THRESHOLD: f64 = 0.01;

/// Default index of the fixed comparison frame.
pub const DEFAULT_REFERENCE_FRAME: usize = 0;

/// Default ring-search radius bound.
pub const DEFAULT_MAX_SEARCH: i32 = 3;

/// `max_search` value that selects the exhaustive strategy.
pub const EXHAUSTIVE_MAX_SEARCH: i32 = -1;

/// Weighted agreement: reference and current both white.
pub const WEIGHT_WHITE_MATCH: i64 = 20;

/// Weighted agreement: reference white, current black.
pub const WEIGHT_WHITE_MISS: i64 = -20;

/// Weighted agreement: reference and current both black.
pub const WEIGHT_BLACK_MATCH: i64 = 1;

/// Weighted agreement: reference black, current white.
pub const WEIGHT_BLACK_MISS: i64 = -1;

/// Default binarization level for 8-bit masks (samples >= level become white).
pub const DEFAULT_BINARIZE_LEVEL: u8 = 161;

/// Number of histogram bins for Otsu's thresholding.
pub const OTSU_HISTOGRAM_BINS: usize = 256;
