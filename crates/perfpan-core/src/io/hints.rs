//! Hint files: previously computed offsets, one frame per line.
//!
//! ```text
//! <frame> <dx> <dy> [<match> [<limit>]]
//! ```
//!
//! Only the first three fields are needed to reuse an offset. Blank lines and
//! lines starting with `#` are skipped. A result log is a valid hint file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::error::{PerfPanError, Result};
use crate::frame::LimitFlags;

/// One parsed hint line.
#[derive(Clone, Debug, PartialEq)]
pub struct HintRecord {
    pub frame: usize,
    pub dx: i32,
    pub dy: i32,
    pub score: Option<f64>,
    pub limit: LimitFlags,
}

/// Parse a single line. `Ok(None)` for blank and comment lines.
pub fn parse_hint_line(line: &str, line_no: usize) -> Result<Option<HintRecord>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let malformed = |reason: String| PerfPanError::MalformedHintLine {
        line: line_no,
        reason,
    };

    let mut fields = trimmed.split_whitespace();
    let frame = fields
        .next()
        .and_then(|f| f.parse::<usize>().ok())
        .ok_or_else(|| malformed("expected a non-negative frame index".into()))?;
    let dx = fields
        .next()
        .and_then(parse_offset)
        .ok_or_else(|| malformed("expected an integer dx".into()))?;
    let dy = fields
        .next()
        .and_then(parse_offset)
        .ok_or_else(|| malformed("expected an integer dy".into()))?;

    // Trailing fields are informational; garbage there does not void the line.
    let score = fields
        .next()
        .and_then(|f| f.parse::<f64>().ok())
        .filter(|s| s.is_finite());
    let limit = fields
        .next()
        .and_then(|f| f.parse::<u8>().ok())
        .map(LimitFlags::from_bits)
        .unwrap_or_default();

    Ok(Some(HintRecord {
        frame,
        dx,
        dy,
        score,
        limit,
    }))
}

/// Read every well-formed hint from `reader`, skipping malformed lines.
pub fn read_hints<R: BufRead>(reader: R) -> Result<Vec<HintRecord>> {
    let mut hints = Vec::new();
    for (i, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let parsed = std::str::from_utf8(&raw)
            .map_err(|_| PerfPanError::MalformedHintLine {
                line: i + 1,
                reason: "not valid UTF-8".into(),
            })
            .and_then(|line| parse_hint_line(line, i + 1));
        match parsed {
            Ok(Some(hint)) => hints.push(hint),
            Ok(None) => {}
            Err(e) => warn!("{e}, skipping"),
        }
    }
    Ok(hints)
}

/// Open and read a hint file.
pub fn load_hint_file(path: &Path) -> Result<Vec<HintRecord>> {
    let file = File::open(path).map_err(|source| PerfPanError::IoUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    read_hints(BufReader::new(file))
}

/// Offsets are integers, but `4.00`-style values written by float loggers
/// are accepted when they carry no fraction.
fn parse_offset(field: &str) -> Option<i32> {
    if let Ok(v) = field.parse::<i32>() {
        return Some(v);
    }
    let v = field.parse::<f64>().ok()?;
    if v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
        Some(v as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_line() {
        let h = parse_hint_line("    12    3   -2   0.04210 5", 1)
            .unwrap()
            .unwrap();
        assert_eq!((h.frame, h.dx, h.dy), (12, 3, -2));
        assert_eq!(h.score, Some(0.0421));
        assert_eq!(h.limit, LimitFlags::AT_MIN_X | LimitFlags::AT_MIN_Y);
    }

    #[test]
    fn accepts_integral_float_offsets_and_ignores_trailing_garbage() {
        let h = parse_hint_line("7 4.00 -1.00 junk more junk", 3)
            .unwrap()
            .unwrap();
        assert_eq!((h.frame, h.dx, h.dy), (7, 4, -1));
        assert_eq!(h.score, None);
        assert!(h.limit.is_empty());
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_hint_line("   ", 1).unwrap(), None);
        assert_eq!(parse_hint_line("# frame dx dy", 2).unwrap(), None);
    }

    #[test]
    fn rejects_fractional_offset() {
        let err = parse_hint_line("1 2.5 0", 9).unwrap_err();
        assert!(matches!(err, PerfPanError::MalformedHintLine { line: 9, .. }));
    }

    #[test]
    fn read_hints_skips_malformed_lines() {
        let text = "0 0 0\nnot a hint\n2 1 -1 0.5 0\n3 x\n";
        let hints = read_hints(text.as_bytes()).unwrap();
        let frames: Vec<usize> = hints.iter().map(|h| h.frame).collect();
        assert_eq!(frames, vec![0, 2]);
    }

    #[test]
    fn read_hints_skips_non_utf8_lines() {
        let mut bytes = b"0 1 1\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b" x\n2 3 -1\r\n");
        let hints = read_hints(bytes.as_slice()).unwrap();
        let offsets: Vec<_> = hints.iter().map(|h| (h.frame, h.dx, h.dy)).collect();
        assert_eq!(offsets, vec![(0, 1, 1), (2, 3, -1)]);
    }
}
