//! Shared numeric constants for the measure crate.

// ── Points ──────────────────────────────────────────────────────

/// Hard cap on vertices per measurement session.
pub const MAX_POINTS: usize = 8;

/// Vertices needed before a polygon encloses an area.
pub const MIN_POLYGON_POINTS: usize = 3;

// ── Calibration ─────────────────────────────────────────────────

/// Baseline used until a capture stream reports its resolution (1 px = 1 cm).
pub const DEFAULT_PIXELS_PER_METER: f64 = 100.0;

/// Neutral value of the fine-tune slider.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Lowest accepted fine-tune multiplier.
pub const MIN_MULTIPLIER: f64 = 0.5;

/// Highest accepted fine-tune multiplier.
pub const MAX_MULTIPLIER: f64 = 3.0;

/// Upper tier starts above 2 MP (1920×1080 is 2,073,600 px).
pub const TWO_MEGAPIXELS: u64 = 2_000_000;

/// Middle tier starts above 1 MP (e.g. 1280×960). 1280×720 is below it.
pub const ONE_MEGAPIXEL: u64 = 1_000_000;

/// Baseline above [`TWO_MEGAPIXELS`].
pub const ABOVE_TWO_MP_PIXELS_PER_METER: f64 = 150.0;

/// Baseline above [`ONE_MEGAPIXEL`], up to and including 2 MP.
pub const ABOVE_ONE_MP_PIXELS_PER_METER: f64 = 100.0;

/// Baseline at or below 1 MP.
pub const UP_TO_ONE_MP_PIXELS_PER_METER: f64 = 80.0;

/// Real-world span assumed to fit across the frame diagonal.
pub const DEFAULT_DIAGONAL_SPAN_M: f64 = 15.0;

// ── Materials ───────────────────────────────────────────────────

/// Waste and cutting allowance applied to every material quantity.
pub const OVERAGE_FACTOR: f64 = 1.10;

// ── Overlay ─────────────────────────────────────────────────────

/// Radius of a vertex marker, in capture pixels.
pub const POINT_RADIUS_PX: f64 = 20.0;

/// Outline stroke width, in capture pixels.
pub const OUTLINE_WIDTH_PX: f64 = 10.0;

/// Dash and gap lengths of the polygon outline.
pub const OUTLINE_DASH_PX: (f64, f64) = (25.0, 15.0);
