mod common;

use std::path::Path;

use image::GrayImage;
use ndarray::Array2;

use perfpan_core::io::image_seq::{load_mask_image, ImageSequence};
use perfpan_core::io::{Binarized, FrameSource};
use perfpan_core::mask::Threshold;
use perfpan_core::pipeline::run_alignment;
use perfpan_core::{AlignConfig, MaskFrame, PanEstimator, PerfPanError};

use common::rect_mask;

fn save_gray(frame: &MaskFrame, path: &Path) {
    let (h, w) = frame.data.dim();
    let img = GrayImage::from_raw(w as u32, h as u32, frame.data.iter().copied().collect())
        .unwrap();
    img.save(path).unwrap();
}

/// A grayscale frame: dim background with a bright, slightly noisy hole.
fn gray_frame(x: usize, y: usize) -> MaskFrame {
    let mut data = Array2::<u8>::from_elem((64, 64), 40);
    for row in y..y + 16 {
        for col in x..x + 16 {
            data[[row, col]] = 200 + ((row + col) % 3) as u8;
        }
    }
    MaskFrame::new(data)
}

#[test]
fn test_sequence_is_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    save_gray(&rect_mask(8, 8, 0, 0, 4, 4), &dir.path().join("frame_002.png"));
    save_gray(&rect_mask(8, 8, 4, 4, 4, 4), &dir.path().join("frame_001.png"));
    std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

    let seq = ImageSequence::open(dir.path()).unwrap();
    assert_eq!(seq.frame_count(), 2);
    assert_eq!(seq.dimensions().unwrap(), (8, 8));
    assert!(seq.paths()[0].ends_with("frame_001.png"));

    let first = seq.read_mask(0).unwrap();
    assert_eq!(first.data, rect_mask(8, 8, 4, 4, 4, 4).data);
}

#[test]
fn test_empty_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        ImageSequence::open(dir.path()),
        Err(PerfPanError::EmptySequence)
    ));
    assert!(matches!(
        ImageSequence::from_paths(Vec::new()),
        Err(PerfPanError::EmptySequence)
    ));
}

#[test]
fn test_load_mask_image_keeps_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mask.png");
    let frame = rect_mask(12, 6, 3, 1, 5, 2);
    save_gray(&frame, &path);
    let loaded = load_mask_image(&path).unwrap();
    assert_eq!(loaded.width(), 12);
    assert_eq!(loaded.height(), 6);
    assert_eq!(loaded.data, frame.data);
}

#[test]
fn test_grayscale_sequence_needs_binarizing() {
    let dir = tempfile::tempdir().unwrap();
    save_gray(&gray_frame(24, 24), &dir.path().join("f0.png"));
    save_gray(&gray_frame(22, 25), &dir.path().join("f1.png"));
    let seq = ImageSequence::open(dir.path()).unwrap();

    let mut raw = PanEstimator::new(AlignConfig::default()).unwrap();
    assert!(matches!(
        run_alignment(&seq, &mut raw),
        Err(PerfPanError::InvalidPixelFormat { value: 40, .. })
    ));

    for threshold in [Threshold::Fixed(161), Threshold::Otsu] {
        let source = Binarized::new(ImageSequence::open(dir.path()).unwrap(), threshold);
        let mut estimator = PanEstimator::new(AlignConfig::default()).unwrap();
        let results = run_alignment(&source, &mut estimator).unwrap();
        assert_eq!((results[1].dx, results[1].dy), (2, -1), "{threshold}");
    }
}
