//! Polygon area and perimeter, and the manual rectangle.
//!
//! Vertices are used exactly in tap order. There is no convexity assumption
//! and self-intersecting outlines are neither detected nor rejected: the
//! shoelace sum still returns a number, it just is not the area of a simple
//! polygon.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::MeasureError;
use crate::calibration::Calibration;
use crate::consts::MIN_POLYGON_POINTS;
use crate::points::{MeasuredPoint, Point};

/// Shoelace area in square pixels over the cyclic vertex sequence.
#[must_use]
pub fn shoelace_area_px(points: &[Point]) -> f64 {
    let n = points.len();
    let twice_signed: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice_signed.abs() / 2.0
}

/// Enclosed area in square meters.
///
/// # Errors
///
/// Returns [`MeasureError::InsufficientPoints`] for fewer than three points.
pub fn compute_area(points: &[Point], calibration: &Calibration) -> Result<f64, MeasureError> {
    ensure_polygon(points.len())?;
    Ok(calibration.to_square_meters(shoelace_area_px(points)))
}

/// Sum of every edge length, closing edge included.
///
/// # Errors
///
/// Returns [`MeasureError::InsufficientPoints`] for fewer than three points.
pub fn compute_perimeter(measured: &[MeasuredPoint]) -> Result<f64, MeasureError> {
    ensure_polygon(measured.len())?;
    Ok(measured.iter().filter_map(|m| m.distance_to_next).sum())
}

fn ensure_polygon(actual: usize) -> Result<(), MeasureError> {
    if actual < MIN_POLYGON_POINTS {
        return Err(MeasureError::InsufficientPoints { required: MIN_POLYGON_POINTS, actual });
    }
    Ok(())
}

/// Area and perimeter of a rectangle entered by hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleMeasure {
    pub area_m2: f64,
    pub perimeter_m: f64,
}

/// Rectangle of `length × width` meters. Bypasses the polygon engine.
///
/// # Errors
///
/// Returns [`MeasureError::InvalidManualInput`] unless both sides are finite
/// and positive.
pub fn manual_rectangle(length: f64, width: f64) -> Result<RectangleMeasure, MeasureError> {
    let length = positive_side("length", length)?;
    let width = positive_side("width", width)?;
    Ok(RectangleMeasure { area_m2: length * width, perimeter_m: 2.0 * (length + width) })
}

/// [`manual_rectangle`] from raw form values.
///
/// # Errors
///
/// Returns [`MeasureError::InvalidManualInput`] for blank or non-numeric
/// values as well as for anything [`manual_rectangle`] rejects.
pub fn parse_manual_rectangle(length: &str, width: &str) -> Result<RectangleMeasure, MeasureError> {
    manual_rectangle(parse_side("length", length)?, parse_side("width", width)?)
}

fn parse_side(name: &str, raw: &str) -> Result<f64, MeasureError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(MeasureError::InvalidManualInput(format!("{name} is required")));
    }
    raw.parse::<f64>()
        .map_err(|_| MeasureError::InvalidManualInput(format!("{name} is not a number: {raw:?}")))
}

fn positive_side(name: &str, value: f64) -> Result<f64, MeasureError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MeasureError::InvalidManualInput(format!("{name} must be a positive number of meters, got {value}")))
    }
}
