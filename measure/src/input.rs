//! Input model: mapping taps on the displayed video onto capture pixels.
//!
//! The `<canvas>` is stretched over the video by CSS, so a tap arrives in
//! client (CSS) coordinates while points are stored in capture pixels. The
//! canvas bounding rectangle and the capture resolution give the scale.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::calibration::Resolution;
use crate::consts::MIN_POLYGON_POINTS;
use crate::points::Point;

/// On-screen rectangle of the canvas, in client (CSS) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Convert a client-space tap to capture pixels.
    ///
    /// Returns `None` for a collapsed rectangle (e.g. a hidden canvas) or a
    /// non-finite tap.
    #[must_use]
    pub fn to_capture(&self, client: Point, capture: Resolution) -> Option<Point> {
        if !(self.width > 0.0 && self.height > 0.0) || !client.x.is_finite() || !client.y.is_finite() {
            return None;
        }
        let scale_x = f64::from(capture.width) / self.width;
        let scale_y = f64::from(capture.height) / self.height;
        Some(Point::new((client.x - self.left) * scale_x, (client.y - self.top) * scale_y))
    }
}

/// Label for the calculate button given how many points are marked.
#[must_use]
pub fn calculate_label(count: usize) -> String {
    if count >= MIN_POLYGON_POINTS {
        "Calculate materials".to_owned()
    } else {
        format!("At least {MIN_POLYGON_POINTS} points ({count}/{MIN_POLYGON_POINTS})")
    }
}
