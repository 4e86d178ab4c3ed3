//! One measurement session: points, calibration, category and capture state.
//!
//! A [`Session`] is created by [`Session::start`] and torn down by
//! [`Session::end`]. Every mutation is a discrete user action and returns a
//! `Result`; the renderer only ever sees a [`Snapshot`].

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::Serialize;
use uuid::Uuid;

use crate::MeasureError;
use crate::calibration::{Calibration, CalibrationStrategy, Resolution, ResolutionTiers};
use crate::geometry;
use crate::materials::{Category, MeasurementResult};
use crate::points::{MeasuredPoint, Point, PointAdded, PointStore};

/// Unique identifier for a measurement session.
pub type SessionId = Uuid;

/// Which screen the session is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Started, waiting for the capture stream.
    #[default]
    Idle,
    /// Capture stream ready; taps add points.
    Live,
    /// Camera unavailable; only manual entry is offered.
    Manual,
}

/// Read-only view handed to the renderer every frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub points: Vec<MeasuredPoint>,
    pub pixels_per_meter: f64,
    pub multiplier: f64,
    pub category: Category,
    pub capture: Option<Resolution>,
    pub mode: Mode,
    pub can_calculate: bool,
}

/// State of a single measurement session.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    strategy: Box<dyn CalibrationStrategy>,
    points: PointStore,
    calibration: Calibration,
    category: Category,
    capture: Option<Resolution>,
    mode: Mode,
}

impl Default for Session {
    fn default() -> Self {
        Self::start(Box::new(ResolutionTiers))
    }
}

impl Session {
    /// Begin a session that derives its baseline with `strategy`.
    #[must_use]
    pub fn start(strategy: Box<dyn CalibrationStrategy>) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(session_id = %id, strategy = strategy.name(), "measurement session started");
        Self {
            id,
            strategy,
            points: PointStore::new(),
            calibration: Calibration::default(),
            category: Category::default(),
            capture: None,
            mode: Mode::Idle,
        }
    }

    // --- Capture collaborator ---

    /// The capture stream is ready: derive the baseline from its resolution.
    ///
    /// The current multiplier is kept.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidCalibration`] if the strategy cannot
    /// produce a positive baseline; the previous calibration stays in effect.
    pub fn on_capture_ready(&mut self, resolution: Resolution) -> Result<Calibration, MeasureError> {
        let baseline = self.strategy.baseline(resolution)?;
        self.calibration = self.calibration.with_baseline(baseline)?;
        self.capture = Some(resolution);
        self.mode = Mode::Live;
        tracing::info!(
            session_id = %self.id,
            width = resolution.width,
            height = resolution.height,
            pixels_per_meter = self.calibration.pixels_per_meter(),
            "capture ready, auto-calibrated"
        );
        Ok(self.calibration)
    }

    /// The camera could not be opened. Clears the measurement, switches to
    /// manual entry and returns the error to surface to the user.
    pub fn on_capture_failed(&mut self, reason: impl Into<String>) -> MeasureError {
        let reason = reason.into();
        tracing::warn!(session_id = %self.id, %reason, "capture device unavailable, falling back to manual entry");
        self.clear();
        self.mode = Mode::Manual;
        MeasureError::CaptureDeviceUnavailable(reason)
    }

    // --- Input collaborator ---

    /// Append a tapped point.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::RejectedMaxPoints`] when the session is full.
    pub fn add_point(&mut self, point: Point) -> Result<PointAdded, MeasureError> {
        match self.points.add_point(point) {
            Ok(added) => {
                tracing::debug!(session_id = %self.id, index = added.index, x = point.x, y = point.y, "point added");
                Ok(added)
            }
            Err(e) => {
                tracing::warn!(session_id = %self.id, error = %e, "point rejected");
                Err(e)
            }
        }
    }

    /// Append the center of the capture frame.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::CaptureDeviceUnavailable`] before a capture
    /// stream is ready, or [`MeasureError::RejectedMaxPoints`] when full.
    pub fn mark_center(&mut self) -> Result<PointAdded, MeasureError> {
        let Some(capture) = self.capture else {
            return Err(MeasureError::CaptureDeviceUnavailable("no capture frame to mark".into()));
        };
        self.add_point(capture.center())
    }

    /// Replace the whole point sequence at once.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::RejectedMaxPoints`] if `points` exceeds the cap.
    pub fn load_points(&mut self, points: Vec<Point>) -> Result<(), MeasureError> {
        self.points.replace(points)?;
        tracing::debug!(session_id = %self.id, count = self.points.len(), "points loaded");
        Ok(())
    }

    /// Move the fine-tune slider. Distances are derived on read, so every
    /// existing edge picks up the new value.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidCalibration`] outside [0.5, 3.0]; the
    /// previous multiplier stays in effect.
    pub fn set_multiplier(&mut self, multiplier: f64) -> Result<Calibration, MeasureError> {
        self.calibration = self.calibration.with_multiplier(multiplier)?;
        tracing::debug!(session_id = %self.id, multiplier, "calibration multiplier changed");
        Ok(self.calibration)
    }

    pub fn select_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Select a category by key.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::UnknownCategory`]; the current category is kept.
    pub fn select_category_key(&mut self, key: &str) -> Result<Category, MeasureError> {
        let category = key.parse()?;
        self.select_category(category);
        Ok(category)
    }

    // --- Lifecycle ---

    /// Clear all points and put the multiplier back to neutral. The capture
    /// baseline survives.
    pub fn reset(&mut self) {
        self.points.reset();
        self.calibration = self.calibration.neutral();
        tracing::debug!(session_id = %self.id, "measurement reset");
    }

    /// Stop the session: drop the capture and every point and calibration value.
    pub fn end(&mut self) {
        self.clear();
        self.mode = Mode::Idle;
        tracing::info!(session_id = %self.id, "measurement session ended");
    }

    fn clear(&mut self) {
        self.points.reset();
        self.calibration = Calibration::default();
        self.capture = None;
    }

    // --- Queries ---

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn capture(&self) -> Option<Resolution> {
        self.capture
    }

    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        self.points.points()
    }

    /// Points with their outgoing edge lengths under the current calibration.
    #[must_use]
    pub fn distances(&self) -> Vec<MeasuredPoint> {
        self.points.measured(&self.calibration)
    }

    /// Area and perimeter of the current polygon, plus its materials list.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InsufficientPoints`] below three points.
    pub fn calculate(&self) -> Result<MeasurementResult, MeasureError> {
        let area_m2 = geometry::compute_area(self.points.points(), &self.calibration)?;
        let perimeter_m = geometry::compute_perimeter(&self.distances())?;
        tracing::info!(session_id = %self.id, area_m2, perimeter_m, category = %self.category, "measurement calculated");
        Ok(MeasurementResult::new(area_m2, perimeter_m, self.category))
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            points: self.distances(),
            pixels_per_meter: self.calibration.pixels_per_meter(),
            multiplier: self.calibration.multiplier(),
            category: self.category,
            capture: self.capture,
            mode: self.mode,
            can_calculate: self.points.is_closed(),
        }
    }
}

/// Manual length × width entry. Bypasses the point and polygon engines.
///
/// # Errors
///
/// Returns [`MeasureError::InvalidManualInput`] for non-positive sides.
pub fn manual_measurement(length: f64, width: f64, category: Category) -> Result<MeasurementResult, MeasureError> {
    let rect = geometry::manual_rectangle(length, width)?;
    tracing::info!(length, width, area_m2 = rect.area_m2, category = %category, "manual measurement");
    Ok(MeasurementResult::new(rect.area_m2, rect.perimeter_m, category))
}

/// [`manual_measurement`] from raw form values.
///
/// # Errors
///
/// Returns [`MeasureError::InvalidManualInput`] for blank or non-numeric
/// sides, or [`MeasureError::UnknownCategory`] for an unknown category key.
pub fn manual_measurement_from_input(length: &str, width: &str, category: &str) -> Result<MeasurementResult, MeasureError> {
    let rect = geometry::parse_manual_rectangle(length, width)?;
    let category = category.parse()?;
    Ok(MeasurementResult::new(rect.area_m2, rect.perimeter_m, category))
}
