use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::MeasureError;
use crate::calibration::{CalibrationStrategy, Resolution};
use crate::input::{self, DisplayRect};
use crate::materials::{Category, MeasurementResult};
use crate::points::{Point, PointAdded};
use crate::render;
use crate::session::{self, Session, Snapshot};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from event handlers for the host to present.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Size the canvas backing store to the accepted capture frame.
    ResizeCanvas { width: u32, height: u32 },
    PointAdded { index: usize, count: usize },
    CalibrationChanged { pixels_per_meter: f64, multiplier: f64 },
    CategoryChanged(Category),
    ShowResult(MeasurementResult),
    /// Switch the host to the manual length × width screen.
    ShowManualEntry,
    /// A user-visible message; the action that raised it had no effect.
    Notice(String),
    RenderNeeded,
}

/// Session-driven event handling with no canvas dependency.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Every handler recovers from [`MeasureError`] by returning a [`Action::Notice`].
#[derive(Debug, Default)]
pub struct EngineCore {
    pub session: Session,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_strategy(strategy: Box<dyn CalibrationStrategy>) -> Self {
        Self { session: Session::start(strategy) }
    }

    // --- Capture device ---

    pub fn on_capture_ready(&mut self, width: u32, height: u32) -> Vec<Action> {
        match self.session.on_capture_ready(Resolution::new(width, height)) {
            Ok(cal) => vec![
                Action::ResizeCanvas { width, height },
                Action::CalibrationChanged { pixels_per_meter: cal.pixels_per_meter(), multiplier: cal.multiplier() },
                Action::RenderNeeded,
            ],
            Err(e) => notice(e),
        }
    }

    pub fn on_capture_error(&mut self, reason: &str) -> Vec<Action> {
        let err = self.session.on_capture_failed(reason);
        vec![Action::Notice(err.to_string()), Action::ShowManualEntry]
    }

    // --- Input ---

    /// A tap on the canvas at client coordinates `client`.
    pub fn on_tap(&mut self, client: Point, rect: DisplayRect) -> Vec<Action> {
        let Some(capture) = self.session.capture() else {
            return notice(MeasureError::CaptureDeviceUnavailable("camera is not ready yet".into()));
        };
        let Some(point) = rect.to_capture(client, capture) else {
            return Vec::new();
        };
        added(self.session.add_point(point))
    }

    pub fn on_mark_center(&mut self) -> Vec<Action> {
        added(self.session.mark_center())
    }

    pub fn on_multiplier_input(&mut self, multiplier: f64) -> Vec<Action> {
        match self.session.set_multiplier(multiplier) {
            Ok(cal) => vec![
                Action::CalibrationChanged { pixels_per_meter: cal.pixels_per_meter(), multiplier: cal.multiplier() },
                Action::RenderNeeded,
            ],
            Err(e) => notice(e),
        }
    }

    pub fn on_category_selected(&mut self, key: &str) -> Vec<Action> {
        match self.session.select_category_key(key) {
            Ok(category) => vec![Action::CategoryChanged(category)],
            Err(e) => notice(e),
        }
    }

    pub fn on_calculate(&mut self) -> Vec<Action> {
        match self.session.calculate() {
            Ok(result) => vec![Action::ShowResult(result)],
            Err(e) => notice(e),
        }
    }

    /// Manual entry form submitted with raw field values.
    pub fn on_manual_submit(&mut self, length: &str, width: &str, category: &str) -> Vec<Action> {
        match session::manual_measurement_from_input(length, width, category) {
            Ok(result) => vec![Action::ShowResult(result)],
            Err(e) => notice(e),
        }
    }

    pub fn on_reset(&mut self) -> Vec<Action> {
        self.session.reset();
        let cal = self.session.calibration();
        vec![
            Action::CalibrationChanged { pixels_per_meter: cal.pixels_per_meter(), multiplier: cal.multiplier() },
            Action::RenderNeeded,
        ]
    }

    pub fn on_stop(&mut self) -> Vec<Action> {
        self.session.end();
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    /// Caption for the host's calculate button.
    #[must_use]
    pub fn calculate_label(&self) -> String {
        input::calculate_label(self.session.points().len())
    }
}

fn added(result: Result<PointAdded, MeasureError>) -> Vec<Action> {
    match result {
        Ok(p) => vec![Action::PointAdded { index: p.index, count: p.count }, Action::RenderNeeded],
        Err(e) => notice(e),
    }
}

fn notice(err: MeasureError) -> Vec<Action> {
    tracing::debug!(error = %err, "action rejected");
    vec![Action::Notice(err.to_string())]
}

/// The full browser engine. Wraps `EngineCore` and owns the overlay canvas.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx, core: EngineCore::new() })
    }

    // --- Delegated events ---

    /// Auto-calibrate, then size the canvas backing store if the frame was accepted.
    pub fn on_capture_ready(&mut self, width: u32, height: u32) -> Vec<Action> {
        let actions = self.core.on_capture_ready(width, height);
        for action in &actions {
            if let Action::ResizeCanvas { width, height } = *action {
                self.canvas.set_width(width);
                self.canvas.set_height(height);
            }
        }
        actions
    }

    pub fn on_capture_error(&mut self, reason: &str) -> Vec<Action> {
        self.core.on_capture_error(reason)
    }

    pub fn on_tap(&mut self, client: Point, rect: DisplayRect) -> Vec<Action> {
        self.core.on_tap(client, rect)
    }

    pub fn on_mark_center(&mut self) -> Vec<Action> {
        self.core.on_mark_center()
    }

    pub fn on_multiplier_input(&mut self, multiplier: f64) -> Vec<Action> {
        self.core.on_multiplier_input(multiplier)
    }

    pub fn on_category_selected(&mut self, key: &str) -> Vec<Action> {
        self.core.on_category_selected(key)
    }

    pub fn on_calculate(&mut self) -> Vec<Action> {
        self.core.on_calculate()
    }

    pub fn on_manual_submit(&mut self, length: &str, width: &str, category: &str) -> Vec<Action> {
        self.core.on_manual_submit(length, width, category)
    }

    pub fn on_reset(&mut self) -> Vec<Action> {
        self.core.on_reset()
    }

    pub fn on_stop(&mut self) -> Vec<Action> {
        self.core.on_stop()
    }

    // --- Render ---

    /// Draw the current snapshot. Called by the host on every animation frame.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        render::draw(&self.ctx, &self.core.snapshot(), width, height)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.core.snapshot()
    }
}
