//! Rendering: draws the measurement overlay on top of the live video.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only [`Snapshot`] every animation frame and produces
//! pixels; it never mutates session state. Coordinates are capture pixels,
//! which is also the canvas backing size.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{OUTLINE_DASH_PX, OUTLINE_WIDTH_PX, POINT_RADIUS_PX};
use crate::points::{MeasuredPoint, Point};
use crate::session::Snapshot;

const MARKER_FILL: &str = "#3B82F6";
const LABEL_FILL: &str = "#FFFFFF";
const SHADOW: &str = "rgba(0, 0, 0, 0.7)";
const POINT_LABEL_BG: &str = "rgba(0, 0, 0, 0.85)";
const DISTANCE_LABEL_BG: &str = "rgba(59, 130, 246, 0.95)";

const POINT_FONT: &str = "bold 28px Arial";
const DISTANCE_FONT: &str = "bold 32px Arial";

/// Human-readable edge length: meters from 1 m up, centimeters below.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters >= 1.0 {
        format!("{meters:.2} m")
    } else {
        format!("{:.1} cm", meters * 100.0)
    }
}

/// Marker caption for the point at zero-based `index`.
#[must_use]
pub fn point_label(index: usize) -> String {
    format!("Point {}", index + 1)
}

/// Edges that currently have a length: `(from, to, meters)`.
#[must_use]
pub fn labelled_edges(points: &[MeasuredPoint]) -> Vec<(Point, Point, f64)> {
    let n = points.len();
    points
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.distance_to_next.map(|d| (m.point, points[(i + 1) % n].point, d)))
        .collect()
}

/// Draw the full overlay: outline, vertex markers, then edge labels.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(ctx: &CanvasRenderingContext2d, snapshot: &Snapshot, width: f64, height: f64) -> Result<(), JsValue> {
    ctx.clear_rect(0.0, 0.0, width, height);

    draw_outline(ctx, &snapshot.points)?;
    for (i, m) in snapshot.points.iter().enumerate() {
        draw_marker(ctx, m.point, i)?;
    }
    for (from, to, meters) in labelled_edges(&snapshot.points) {
        draw_distance_label(ctx, from.midpoint(to), meters)?;
    }
    Ok(())
}

fn draw_outline(ctx: &CanvasRenderingContext2d, points: &[MeasuredPoint]) -> Result<(), JsValue> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };
    if rest.is_empty() {
        return Ok(());
    }

    ctx.save();
    ctx.begin_path();
    ctx.move_to(first.point.x, first.point.y);
    for m in rest {
        ctx.line_to(m.point.x, m.point.y);
    }
    if rest.len() >= 2 {
        ctx.close_path();
    }

    let dash_array = js_sys::Array::new();
    dash_array.push(&OUTLINE_DASH_PX.0.into());
    dash_array.push(&OUTLINE_DASH_PX.1.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.set_stroke_style_str(LABEL_FILL);
    ctx.set_line_width(OUTLINE_WIDTH_PX);
    ctx.set_shadow_color(SHADOW);
    ctx.set_shadow_blur(12.0);
    ctx.stroke();
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

fn draw_marker(ctx: &CanvasRenderingContext2d, at: Point, index: usize) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(at.x, at.y, POINT_RADIUS_PX, 0.0, TAU)?;
    ctx.set_fill_style_str(MARKER_FILL);
    ctx.fill();
    ctx.set_stroke_style_str(LABEL_FILL);
    ctx.set_line_width(5.0);
    ctx.stroke();

    let label = point_label(index);
    ctx.set_font(POINT_FONT);
    ctx.set_text_align("left");
    let text_w = measured_text_width(ctx, &label);

    ctx.set_fill_style_str(POINT_LABEL_BG);
    ctx.fill_rect(at.x + 28.0, at.y - 40.0, text_w + 20.0, 40.0);
    ctx.set_fill_style_str(LABEL_FILL);
    ctx.fill_text(&label, at.x + 38.0, at.y - 12.0)?;
    Ok(())
}

fn draw_distance_label(ctx: &CanvasRenderingContext2d, mid: Point, meters: f64) -> Result<(), JsValue> {
    let text = format_distance(meters);
    ctx.save();
    ctx.set_font(DISTANCE_FONT);
    let text_w = measured_text_width(ctx, &text);

    ctx.set_shadow_color(SHADOW);
    ctx.set_shadow_blur(10.0);
    ctx.set_fill_style_str(DISTANCE_LABEL_BG);
    ctx.fill_rect(mid.x - text_w / 2.0 - 18.0, mid.y - 28.0, text_w + 36.0, 52.0);

    ctx.set_shadow_blur(4.0);
    ctx.set_fill_style_str(LABEL_FILL);
    ctx.set_text_align("center");
    ctx.fill_text(&text, mid.x, mid.y + 10.0)?;
    ctx.restore();
    Ok(())
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => 0.0,
    }
}
