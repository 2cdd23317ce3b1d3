use std::path::Path;

use perfpan_core::align::{ScoringPolicy, SearchStrategy};
use perfpan_core::consts::{DEFAULT_BLANK_THRESHOLD, DEFAULT_MAX_SEARCH};
use perfpan_core::frame::ShiftBounds;
use perfpan_core::mask::Threshold;
use perfpan_core::{AlignConfig, LimitFlags, OffsetOrigin, PerfPanError, Shift};

// ---------------------------------------------------------------------------
// AlignConfig defaults and serde
// ---------------------------------------------------------------------------

#[test]
fn test_default_config() {
    let config = AlignConfig::default();
    assert_eq!(config.blank_threshold, DEFAULT_BLANK_THRESHOLD);
    assert_eq!(config.reference_frame, 0);
    assert_eq!(config.max_search, DEFAULT_MAX_SEARCH);
    assert!(!config.copy_on_limit);
    assert_eq!(
        config.strategy().unwrap(),
        SearchStrategy::Gradient { max_radius: 3 }
    );
    assert_eq!(
        config.scoring_policy().unwrap(),
        ScoringPolicy::WeightedAgreement
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_uses_defaults() {
    let config: AlignConfig =
        serde_json::from_str(r#"{ "max_search": -1, "copy_on_limit": true }"#).unwrap();
    assert_eq!(config.strategy().unwrap(), SearchStrategy::Exhaustive);
    assert_eq!(config.scoring_policy().unwrap(), ScoringPolicy::MismatchRatio);
    assert!(config.copy_on_limit);
    assert_eq!(config.blank_threshold, DEFAULT_BLANK_THRESHOLD);
    assert!(config.hint_file.is_none());
}

#[test]
fn test_scoring_override() {
    let config: AlignConfig =
        serde_json::from_str(r#"{ "max_search": -1, "scoring": "WeightedAgreement" }"#).unwrap();
    assert_eq!(
        config.scoring_policy().unwrap(),
        ScoringPolicy::WeightedAgreement
    );
}

#[test]
fn test_config_json_roundtrip() {
    let config = AlignConfig {
        max_search: 6,
        reference_frame: 12,
        log_file: Some("pan.log".into()),
        ..AlignConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: AlignConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.max_search, 6);
    assert_eq!(back.reference_frame, 12);
    assert_eq!(back.log_path(), Some(Path::new("pan.log")));
}

#[test]
fn test_empty_paths_are_disabled() {
    let config = AlignConfig {
        hint_file: Some("".into()),
        log_file: Some("out.log".into()),
        ..AlignConfig::default()
    };
    assert_eq!(config.hint_path(), None);
    assert_eq!(config.log_path(), Some(Path::new("out.log")));
    assert_eq!(config.plot_path(), None);
}

#[test]
fn test_validate_rejects_bad_values() {
    for bt in [-0.1, 1.0, f64::NAN] {
        let config = AlignConfig {
            blank_threshold: bt,
            ..AlignConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PerfPanError::InvalidConfig(_))
        ));
    }
    let config = AlignConfig {
        max_search: -7,
        ..AlignConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(PerfPanError::InvalidConfig(_))
    ));
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[test]
fn test_display_strings() {
    assert_eq!(format!("{}", ScoringPolicy::MismatchRatio), "Mismatch Ratio");
    assert_eq!(
        format!("{}", ScoringPolicy::WeightedAgreement),
        "Weighted Agreement"
    );
    assert_eq!(format!("{}", SearchStrategy::Exhaustive), "Exhaustive");
    assert_eq!(
        format!("{}", SearchStrategy::Gradient { max_radius: 3 }),
        "Gradient (radius 3)"
    );
    assert_eq!(format!("{}", Threshold::Fixed(161)), "Fixed (161)");
    assert_eq!(format!("{}", Threshold::Otsu), "Otsu");
    assert_eq!(format!("{}", OffsetOrigin::CopiedOnLimit), "copied");
    assert_eq!(format!("{}", Shift::new(-2, 5)), "(-2, 5)");
}

#[test]
fn test_limit_flags_display() {
    assert_eq!(format!("{}", LimitFlags::NONE), "-");
    assert_eq!(
        format!("{}", LimitFlags::AT_MIN_X | LimitFlags::AT_MAX_Y),
        "min-x,max-y"
    );
}

// ---------------------------------------------------------------------------
// Shift bounds
// ---------------------------------------------------------------------------

#[test]
fn test_bounds_are_exclusive_quarter_frame() {
    let b = ShiftBounds::for_frame(40, 22);
    assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (-10, 10, -5, 5));
    assert!(b.contains(Shift::new(9, -4)));
    assert!(!b.contains(Shift::new(10, 0)));
    assert!(!b.contains(Shift::new(0, -5)));
    assert_eq!(b.grid_size(), (19, 9));
}

#[test]
fn test_limit_flags_one_inside_bound() {
    let b = ShiftBounds::for_frame(32, 32);
    assert_eq!(b.limit_flags(Shift::new(0, 0)), LimitFlags::NONE);
    assert_eq!(b.limit_flags(Shift::new(6, -6)), LimitFlags::NONE);
    assert_eq!(b.limit_flags(Shift::new(7, 0)), LimitFlags::AT_MAX_X);
    assert_eq!(
        b.limit_flags(Shift::new(-7, 7)),
        LimitFlags::AT_MIN_X | LimitFlags::AT_MAX_Y
    );
    assert_eq!(b.limit_flags(Shift::new(0, -7)), LimitFlags::AT_MIN_Y);
}

#[test]
fn test_tiny_frame_has_empty_grid() {
    let b = ShiftBounds::for_frame(3, 3);
    assert_eq!(b.grid_size(), (0, 0));
    assert!(!b.contains(Shift::new(0, 0)));
}
