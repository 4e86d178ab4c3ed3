//! Error type shared by every measurement operation.
//!
//! None of these are fatal. Each is raised by a single user action (a tap, a
//! slider move, a calculate press) and the session stays usable afterwards;
//! [`crate::engine::EngineCore`] turns them into user-visible notices.

use crate::consts::{MAX_MULTIPLIER, MIN_MULTIPLIER};

/// Error returned by session, calibration, geometry and material operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeasureError {
    /// The point sequence is full; the user must reset before adding more.
    #[error("at most {max} points per measurement; reset to start over")]
    RejectedMaxPoints { max: usize },
    /// Too few vertices to enclose an area.
    #[error("at least {required} points are needed, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },
    /// Non-positive pixels-per-meter or a multiplier outside its domain.
    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),
    /// Missing, non-numeric or non-positive manual length/width.
    #[error("invalid manual input: {0}")]
    InvalidManualInput(String),
    /// Category key outside {floor, wall, ceiling}.
    #[error("unknown surface category: {0}")]
    UnknownCategory(String),
    /// Camera permission or access failure; the session falls back to manual entry.
    #[error("camera unavailable: {0}")]
    CaptureDeviceUnavailable(String),
}

impl MeasureError {
    pub(crate) fn multiplier_out_of_range(multiplier: f64) -> Self {
        Self::InvalidCalibration(format!(
            "multiplier {multiplier} outside [{MIN_MULTIPLIER}, {MAX_MULTIPLIER}]"
        ))
    }
}
