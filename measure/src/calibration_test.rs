#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Resolution ---

#[test]
fn resolution_pixel_count() {
    assert_eq!(Resolution::new(1920, 1080).pixel_count(), 2_073_600);
}

#[test]
fn resolution_pixel_count_does_not_overflow_u32() {
    let r = Resolution::new(100_000, 100_000);
    assert_eq!(r.pixel_count(), 10_000_000_000);
}

#[test]
fn resolution_diagonal() {
    assert!(approx_eq(Resolution::new(3, 4).diagonal(), 5.0));
}

#[test]
fn resolution_center() {
    let c = Resolution::new(1280, 720).center();
    assert_eq!(c, Point::new(640.0, 360.0));
}

// --- ResolutionTiers ---

#[test]
fn tiers_full_hd() {
    assert_eq!(ResolutionTiers.baseline(Resolution::new(1920, 1080)).unwrap(), 150.0);
}

#[test]
fn tiers_above_one_megapixel() {
    assert_eq!(ResolutionTiers.baseline(Resolution::new(1280, 960)).unwrap(), 100.0);
}

#[test]
fn tiers_720p_is_below_one_megapixel() {
    assert_eq!(ResolutionTiers.baseline(Resolution::new(1280, 720)).unwrap(), 80.0);
}

#[test]
fn tiers_sd() {
    assert_eq!(ResolutionTiers.baseline(Resolution::new(640, 480)).unwrap(), 80.0);
}

#[test]
fn tiers_boundaries_are_exclusive() {
    // Exactly 2 MP and exactly 1 MP fall into the lower tier.
    assert_eq!(ResolutionTiers.baseline(Resolution::new(2000, 1000)).unwrap(), 100.0);
    assert_eq!(ResolutionTiers.baseline(Resolution::new(1000, 1000)).unwrap(), 80.0);
}

#[test]
fn tiers_monotonic_in_resolution() {
    let sizes = [(320, 240), (640, 480), (1280, 720), (1600, 900), (1920, 1080), (3840, 2160)];
    let baselines: Vec<f64> = sizes
        .iter()
        .map(|&(w, h)| ResolutionTiers.baseline(Resolution::new(w, h)).unwrap())
        .collect();
    assert!(baselines.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn tiers_reject_empty_frame() {
    let err = ResolutionTiers.baseline(Resolution::new(0, 1080)).unwrap_err();
    assert!(matches!(err, MeasureError::InvalidCalibration(_)));
}

#[test]
fn derive_auto_calibration_uses_tiers() {
    assert_eq!(derive_auto_calibration(1920, 1080).unwrap(), 150.0);
    assert_eq!(derive_auto_calibration(640, 480).unwrap(), 80.0);
}

// --- DiagonalSpan ---

#[test]
fn diagonal_divides_by_span() {
    let strategy = DiagonalSpan { span_m: 5.0 };
    assert!(approx_eq(strategy.baseline(Resolution::new(300, 400)).unwrap(), 100.0));
}

#[test]
fn diagonal_default_span() {
    assert_eq!(DiagonalSpan::default().span_m, DEFAULT_DIAGONAL_SPAN_M);
}

#[test]
fn diagonal_rejects_non_positive_span() {
    for span_m in [0.0, -1.0, f64::NAN] {
        let err = DiagonalSpan { span_m }.baseline(Resolution::new(640, 480)).unwrap_err();
        assert!(matches!(err, MeasureError::InvalidCalibration(_)));
    }
}

#[test]
fn diagonal_rejects_empty_frame() {
    assert!(DiagonalSpan::default().baseline(Resolution::new(640, 0)).is_err());
}

#[test]
fn strategy_names() {
    assert_eq!(ResolutionTiers.name(), "tiers");
    assert_eq!(DiagonalSpan::default().name(), "diagonal");
}

// --- apply_multiplier ---

#[test]
fn apply_multiplier_neutral() {
    assert_eq!(apply_multiplier(150.0, 1.0).unwrap(), 150.0);
}

#[test]
fn apply_multiplier_two_halves_pixels_per_meter() {
    assert_eq!(apply_multiplier(100.0, 2.0).unwrap(), 50.0);
}

#[test]
fn apply_multiplier_accepts_domain_edges() {
    assert!(apply_multiplier(100.0, 0.5).is_ok());
    assert!(apply_multiplier(100.0, 3.0).is_ok());
}

#[test]
fn apply_multiplier_rejects_outside_domain() {
    for m in [0.0, -1.0, 0.49, 3.01, f64::NAN, f64::INFINITY] {
        let err = apply_multiplier(100.0, m).unwrap_err();
        assert!(matches!(err, MeasureError::InvalidCalibration(_)), "multiplier {m}");
    }
}

#[test]
fn apply_multiplier_rejects_non_positive_baseline() {
    for b in [0.0, -10.0, f64::NAN] {
        assert!(matches!(apply_multiplier(b, 1.0), Err(MeasureError::InvalidCalibration(_))));
    }
}

// --- Calibration ---

#[test]
fn calibration_default() {
    let cal = Calibration::default();
    assert_eq!(cal.baseline(), 100.0);
    assert_eq!(cal.multiplier(), 1.0);
    assert_eq!(cal.pixels_per_meter(), 100.0);
}

#[test]
fn calibration_with_multiplier_keeps_baseline() {
    let cal = Calibration::from_baseline(150.0).unwrap().with_multiplier(1.5).unwrap();
    assert_eq!(cal.baseline(), 150.0);
    assert!(approx_eq(cal.pixels_per_meter(), 100.0));
}

#[test]
fn calibration_with_baseline_keeps_multiplier() {
    let cal = Calibration::new(100.0, 2.0).unwrap().with_baseline(80.0).unwrap();
    assert_eq!(cal.multiplier(), 2.0);
    assert_eq!(cal.pixels_per_meter(), 40.0);
}

#[test]
fn calibration_neutral_restores_multiplier() {
    let cal = Calibration::new(150.0, 2.5).unwrap().neutral();
    assert_eq!(cal.multiplier(), 1.0);
    assert_eq!(cal.baseline(), 150.0);
}

#[test]
fn calibration_rejects_bad_values() {
    assert!(Calibration::new(0.0, 1.0).is_err());
    assert!(Calibration::new(100.0, 4.0).is_err());
    assert!(Calibration::default().with_multiplier(0.1).is_err());
}

#[test]
fn to_meters_and_square_meters() {
    let cal = Calibration::from_baseline(200.0).unwrap();
    assert!(approx_eq(cal.to_meters(400.0), 2.0));
    assert!(approx_eq(cal.to_square_meters(40_000.0), 1.0));
}
