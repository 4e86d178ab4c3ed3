use super::*;

const EPSILON: f64 = 1e-10;

fn point_approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

const FULL_HD: Resolution = Resolution { width: 1920, height: 1080 };

// --- to_capture ---

#[test]
fn identity_when_display_matches_capture() {
    let rect = DisplayRect::new(0.0, 0.0, 1920.0, 1080.0);
    let p = rect.to_capture(Point::new(100.0, 200.0), FULL_HD).unwrap();
    assert!(point_approx_eq(p, Point::new(100.0, 200.0)));
}

#[test]
fn center_of_half_size_display_maps_to_frame_center() {
    let rect = DisplayRect::new(0.0, 0.0, 960.0, 540.0);
    let p = rect.to_capture(Point::new(480.0, 270.0), FULL_HD).unwrap();
    assert!(point_approx_eq(p, FULL_HD.center()));
}

#[test]
fn offset_rect_is_subtracted_before_scaling() {
    let rect = DisplayRect::new(20.0, 60.0, 480.0, 270.0);
    let p = rect.to_capture(Point::new(20.0, 60.0), FULL_HD).unwrap();
    assert!(point_approx_eq(p, Point::new(0.0, 0.0)));

    let q = rect.to_capture(Point::new(500.0, 330.0), FULL_HD).unwrap();
    assert!(point_approx_eq(q, Point::new(1920.0, 1080.0)));
}

#[test]
fn non_uniform_stretch_scales_axes_independently() {
    let rect = DisplayRect::new(0.0, 0.0, 960.0, 1080.0);
    let p = rect.to_capture(Point::new(960.0, 1080.0), FULL_HD).unwrap();
    assert!(point_approx_eq(p, Point::new(1920.0, 1080.0)));
}

#[test]
fn collapsed_rect_yields_none() {
    assert!(DisplayRect::new(0.0, 0.0, 0.0, 540.0).to_capture(Point::new(1.0, 1.0), FULL_HD).is_none());
    assert!(DisplayRect::new(0.0, 0.0, 960.0, f64::NAN).to_capture(Point::new(1.0, 1.0), FULL_HD).is_none());
}

#[test]
fn non_finite_tap_yields_none() {
    let rect = DisplayRect::new(0.0, 0.0, 960.0, 540.0);
    assert!(rect.to_capture(Point::new(f64::NAN, 1.0), FULL_HD).is_none());
}

// --- calculate_label ---

#[test]
fn calculate_label_counts_up_to_three() {
    assert_eq!(calculate_label(0), "At least 3 points (0/3)");
    assert_eq!(calculate_label(2), "At least 3 points (2/3)");
}

#[test]
fn calculate_label_ready() {
    assert_eq!(calculate_label(3), "Calculate materials");
    assert_eq!(calculate_label(8), "Calculate materials");
}
