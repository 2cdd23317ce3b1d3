#![allow(dead_code)]

use ndarray::Array2;

use perfpan_core::consts::MASK_WHITE;
use perfpan_core::io::ser::SER_HEADER_SIZE;
use perfpan_core::MaskFrame;

/// An all-black mask of the given size.
pub fn black_mask(width: usize, height: usize) -> MaskFrame {
    MaskFrame::new(Array2::<u8>::zeros((height, width)))
}

/// Paint a white rectangle with its top-left corner at column `x`, row `y`.
pub fn paint_rect(frame: &mut MaskFrame, x: usize, y: usize, w: usize, h: usize) {
    for row in y..y + h {
        for col in x..x + w {
            frame.data[[row, col]] = MASK_WHITE;
        }
    }
}

/// A black mask with one white rectangle.
pub fn rect_mask(width: usize, height: usize, x: usize, y: usize, w: usize, h: usize) -> MaskFrame {
    let mut frame = black_mask(width, height);
    paint_rect(&mut frame, x, y, w, h);
    frame
}

/// Left half white, right half black.
pub fn half_mask(width: usize, height: usize) -> MaskFrame {
    rect_mask(width, height, 0, 0, width / 2, height)
}

/// Swap black and white everywhere.
pub fn invert(frame: &MaskFrame) -> MaskFrame {
    MaskFrame::new(frame.data.mapv(|v| 255 - v))
}

/// Build a SER file header for mono frames.
pub fn build_ser_header(width: u32, height: u32, bit_depth: u32, num_frames: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SER_HEADER_SIZE);

    // Magic (14 bytes)
    buf.extend_from_slice(b"LUCAM-RECORDER");
    // LuID (4 bytes)
    buf.extend_from_slice(&0i32.to_le_bytes());
    // ColorID = MONO (4 bytes)
    buf.extend_from_slice(&0i32.to_le_bytes());
    // LittleEndian = 0 (little-endian per Siril convention)
    buf.extend_from_slice(&0i32.to_le_bytes());
    // Width
    buf.extend_from_slice(&(width as i32).to_le_bytes());
    // Height
    buf.extend_from_slice(&(height as i32).to_le_bytes());
    // PixelDepth
    buf.extend_from_slice(&(bit_depth as i32).to_le_bytes());
    // FrameCount
    buf.extend_from_slice(&(num_frames as i32).to_le_bytes());
    // Observer, Instrument, Telescope (40 bytes each)
    buf.extend_from_slice(&[0u8; 120]);
    // DateTime, DateTimeUTC (8 bytes each)
    buf.extend_from_slice(&[0u8; 16]);

    assert_eq!(buf.len(), SER_HEADER_SIZE);
    buf
}

/// Build a complete 8-bit mono SER file from mask frames.
pub fn build_ser_from_masks(frames: &[MaskFrame]) -> Vec<u8> {
    let width = frames[0].width() as u32;
    let height = frames[0].height() as u32;
    let mut buf = build_ser_header(width, height, 8, frames.len());
    for frame in frames {
        buf.extend(frame.data.iter().copied());
    }
    buf
}

/// Write bytes to a temporary file that lives as long as the handle.
pub fn write_temp(data: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(data).expect("write temp data");
    f.flush().expect("flush");
    f
}
