//! Calibration model: how many capture pixels make one meter.
//!
//! A [`Calibration`] is a baseline derived from the capture resolution plus
//! the user's fine-tune multiplier. It is a parameter of every distance and
//! area computation and is never baked into stored points, so moving the
//! slider re-measures everything already on screen.
//!
//! The baseline comes from a replaceable [`CalibrationStrategy`]. Neither
//! shipped heuristic is authoritative; they are both rough guesses made
//! without any pose tracking.

#[cfg(test)]
#[path = "calibration_test.rs"]
mod calibration_test;

use serde::{Deserialize, Serialize};

use crate::MeasureError;
use crate::consts::{
    ABOVE_ONE_MP_PIXELS_PER_METER, ABOVE_TWO_MP_PIXELS_PER_METER, DEFAULT_DIAGONAL_SPAN_M, DEFAULT_MULTIPLIER,
    DEFAULT_PIXELS_PER_METER, MAX_MULTIPLIER, MIN_MULTIPLIER, ONE_MEGAPIXEL, TWO_MEGAPIXELS,
    UP_TO_ONE_MP_PIXELS_PER_METER,
};
use crate::points::Point;

/// Pixel dimensions of a ready capture stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count (`width * height`).
    #[must_use]
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Length of the frame diagonal in pixels.
    #[must_use]
    pub fn diagonal(self) -> f64 {
        f64::from(self.width).hypot(f64::from(self.height))
    }

    /// Center of the frame in capture pixels.
    #[must_use]
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    fn ensure_non_empty(self) -> Result<Self, MeasureError> {
        if self.width == 0 || self.height == 0 {
            return Err(MeasureError::InvalidCalibration(format!(
                "empty capture frame {}x{}",
                self.width, self.height
            )));
        }
        Ok(self)
    }
}

/// Maps a capture resolution to a baseline pixels-per-meter value.
pub trait CalibrationStrategy: std::fmt::Debug {
    /// Short name used in logs and CLI output.
    fn name(&self) -> &'static str;

    /// Baseline pixels-per-meter for `resolution`.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidCalibration`] when the frame is empty or
    /// the strategy's own parameters cannot produce a positive baseline.
    fn baseline(&self, resolution: Resolution) -> Result<f64, MeasureError>;
}

/// Three-tier step function of total pixel count.
///
/// Higher resolutions resolve finer detail, so they get more pixels per meter:
/// above 2 MP → 150, above 1 MP → 100, otherwise 80.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionTiers;

impl CalibrationStrategy for ResolutionTiers {
    fn name(&self) -> &'static str {
        "tiers"
    }

    fn baseline(&self, resolution: Resolution) -> Result<f64, MeasureError> {
        let pixels = resolution.ensure_non_empty()?.pixel_count();
        let ppm = if pixels > TWO_MEGAPIXELS {
            ABOVE_TWO_MP_PIXELS_PER_METER
        } else if pixels > ONE_MEGAPIXEL {
            ABOVE_ONE_MP_PIXELS_PER_METER
        } else {
            UP_TO_ONE_MP_PIXELS_PER_METER
        };
        Ok(ppm)
    }
}

/// Frame diagonal divided by the real-world span it is assumed to cover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagonalSpan {
    /// Meters assumed to fit across the frame diagonal.
    pub span_m: f64,
}

impl Default for DiagonalSpan {
    fn default() -> Self {
        Self { span_m: DEFAULT_DIAGONAL_SPAN_M }
    }
}

impl CalibrationStrategy for DiagonalSpan {
    fn name(&self) -> &'static str {
        "diagonal"
    }

    fn baseline(&self, resolution: Resolution) -> Result<f64, MeasureError> {
        if !self.span_m.is_finite() || self.span_m <= 0.0 {
            return Err(MeasureError::InvalidCalibration(format!(
                "diagonal span must be positive, got {}",
                self.span_m
            )));
        }
        Ok(resolution.ensure_non_empty()?.diagonal() / self.span_m)
    }
}

/// Baseline for a `width × height` capture using the default tiered strategy.
///
/// # Errors
///
/// Returns [`MeasureError::InvalidCalibration`] for an empty frame.
pub fn derive_auto_calibration(width: u32, height: u32) -> Result<f64, MeasureError> {
    ResolutionTiers.baseline(Resolution::new(width, height))
}

/// Effective pixels-per-meter for `baseline` fine-tuned by `multiplier`.
///
/// The multiplier scales the length one pixel stands for, so the effective
/// ratio is `baseline / multiplier`: at 2.0 every distance reads twice as long.
///
/// # Errors
///
/// Returns [`MeasureError::InvalidCalibration`] if `baseline <= 0` or the
/// multiplier is outside [0.5, 3.0].
pub fn apply_multiplier(baseline: f64, multiplier: f64) -> Result<f64, MeasureError> {
    let baseline = validate_baseline(baseline)?;
    let multiplier = validate_multiplier(multiplier)?;
    Ok(baseline / multiplier)
}

/// Check that a multiplier is finite and inside [0.5, 3.0].
///
/// # Errors
///
/// Returns [`MeasureError::InvalidCalibration`] otherwise.
pub fn validate_multiplier(multiplier: f64) -> Result<f64, MeasureError> {
    if multiplier.is_finite() && (MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&multiplier) {
        Ok(multiplier)
    } else {
        Err(MeasureError::multiplier_out_of_range(multiplier))
    }
}

fn validate_baseline(baseline: f64) -> Result<f64, MeasureError> {
    if baseline.is_finite() && baseline > 0.0 {
        Ok(baseline)
    } else {
        Err(MeasureError::InvalidCalibration(format!(
            "pixels per meter must be positive, got {baseline}"
        )))
    }
}

/// Baseline plus fine-tune multiplier. Both are validated on construction, so
/// [`Calibration::pixels_per_meter`] is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calibration {
    baseline: f64,
    multiplier: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self { baseline: DEFAULT_PIXELS_PER_METER, multiplier: DEFAULT_MULTIPLIER }
    }
}

impl Calibration {
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidCalibration`] for a non-positive
    /// baseline or an out-of-range multiplier.
    pub fn new(baseline: f64, multiplier: f64) -> Result<Self, MeasureError> {
        Ok(Self { baseline: validate_baseline(baseline)?, multiplier: validate_multiplier(multiplier)? })
    }

    /// Calibration with the neutral multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidCalibration`] for a non-positive baseline.
    pub fn from_baseline(baseline: f64) -> Result<Self, MeasureError> {
        Self::new(baseline, DEFAULT_MULTIPLIER)
    }

    #[must_use]
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Effective pixels per meter after the multiplier.
    #[must_use]
    pub fn pixels_per_meter(&self) -> f64 {
        self.baseline / self.multiplier
    }

    /// Same baseline, new multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidCalibration`] for an out-of-range multiplier.
    pub fn with_multiplier(self, multiplier: f64) -> Result<Self, MeasureError> {
        Self::new(self.baseline, multiplier)
    }

    /// Same baseline, multiplier back to 1.0.
    #[must_use]
    pub fn neutral(self) -> Self {
        Self { baseline: self.baseline, multiplier: DEFAULT_MULTIPLIER }
    }

    /// Same multiplier, new baseline.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidCalibration`] for a non-positive baseline.
    pub fn with_baseline(self, baseline: f64) -> Result<Self, MeasureError> {
        Self::new(baseline, self.multiplier)
    }

    /// Convert a pixel length to meters.
    #[must_use]
    pub fn to_meters(&self, pixels: f64) -> f64 {
        pixels / self.pixels_per_meter()
    }

    /// Convert a pixel area to square meters. Area scales with the square of
    /// the linear factor.
    #[must_use]
    pub fn to_square_meters(&self, square_pixels: f64) -> f64 {
        square_pixels / self.pixels_per_meter().powi(2)
    }
}
