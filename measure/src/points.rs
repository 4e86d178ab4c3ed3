//! Point store and distance engine.
//!
//! Points are capture-space pixels in tap order. The order is the polygon's
//! winding and adjacency, so the store only ever appends or clears. Edge
//! lengths are derived on demand from the points and the current
//! [`Calibration`]; nothing here caches a distance.

#[cfg(test)]
#[path = "points_test.rs"]
mod points_test;

use serde::{Deserialize, Serialize};

use crate::MeasureError;
use crate::calibration::Calibration;
use crate::consts::{MAX_POINTS, MIN_POLYGON_POINTS};

/// A point in capture (image) pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`, in pixels.
    #[must_use]
    pub fn distance_px(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Confirmation that a point was appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointAdded {
    /// Zero-based index of the new point.
    pub index: usize,
    /// Number of points after the append.
    pub count: usize,
}

/// A stored point paired with the length of the edge that leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasuredPoint {
    pub point: Point,
    /// Meters to the next point, or `None` where no edge is defined yet.
    pub distance_to_next: Option<f64>,
}

/// Ordered, capped sequence of tapped points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `point` unless the store is full.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::RejectedMaxPoints`] when [`MAX_POINTS`] points
    /// are already stored; the store is left unchanged.
    pub fn add_point(&mut self, point: Point) -> Result<PointAdded, MeasureError> {
        if self.is_full() {
            return Err(MeasureError::RejectedMaxPoints { max: MAX_POINTS });
        }
        self.points.push(point);
        Ok(PointAdded { index: self.points.len() - 1, count: self.points.len() })
    }

    /// Replace the whole sequence, e.g. from a saved point list.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::RejectedMaxPoints`] if `points` is longer than
    /// [`MAX_POINTS`]; the store is left unchanged.
    pub fn replace(&mut self, points: Vec<Point>) -> Result<(), MeasureError> {
        if points.len() > MAX_POINTS {
            return Err(MeasureError::RejectedMaxPoints { max: MAX_POINTS });
        }
        self.points = points;
        Ok(())
    }

    /// Drop every point.
    pub fn reset(&mut self) {
        self.points.clear();
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.points.len() >= MAX_POINTS
    }

    /// Whether enough points exist to close a polygon.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.points.len() >= MIN_POLYGON_POINTS
    }

    /// Every point with its outgoing edge length under `calibration`.
    #[must_use]
    pub fn measured(&self, calibration: &Calibration) -> Vec<MeasuredPoint> {
        recompute_all_distances(&self.points, calibration)
    }
}

/// Real-world length of the segment `p1 → p2`.
///
/// `pixels_per_meter` must be positive; [`Calibration`] guarantees that.
#[must_use]
pub fn segment_distance(p1: Point, p2: Point, pixels_per_meter: f64) -> f64 {
    p1.distance_px(p2) / pixels_per_meter
}

/// Pair every point with the distance to its successor.
///
/// Point `i` connects to `(i + 1) mod n`. The closing edge from the last
/// point back to the first only exists once there are at least three points;
/// with two points only `0 → 1` is defined.
#[must_use]
pub fn recompute_all_distances(points: &[Point], calibration: &Calibration) -> Vec<MeasuredPoint> {
    let n = points.len();
    let ppm = calibration.pixels_per_meter();
    points
        .iter()
        .enumerate()
        .map(|(i, &point)| {
            let is_closing = i + 1 == n;
            let distance_to_next = if n < 2 || (is_closing && n < MIN_POLYGON_POINTS) {
                None
            } else {
                Some(segment_distance(point, points[(i + 1) % n], ppm))
            };
            MeasuredPoint { point, distance_to_next }
        })
        .collect()
}
