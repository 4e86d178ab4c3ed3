//! Subcommand handlers and result formatting.
//!
//! Handlers return the text to print so they can be tested without
//! capturing stdout.

use std::fs;
use std::io::{self, Read};

use measure::calibration::{Calibration, Resolution};
use measure::materials::{self, Category, MaterialLine, MeasurementResult};
use measure::points::{MeasuredPoint, Point};
use measure::render::format_distance;
use measure::session::{self, Session};
use serde::Serialize;

use crate::config::{Config, OutputFormat};
use crate::error::CliError;

/// Polygon measurement request assembled from CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRequest {
    pub points: Vec<Point>,
    pub capture: Option<Resolution>,
    pub multiplier: f64,
    pub category: Category,
}

#[derive(Debug, Serialize)]
struct PolygonReport<'a> {
    pixels_per_meter: f64,
    edges: &'a [MeasuredPoint],
    #[serde(flatten)]
    result: &'a MeasurementResult,
}

#[derive(Debug, Serialize)]
struct CalibrationReport {
    strategy: &'static str,
    width: u32,
    height: u32,
    baseline: f64,
    multiplier: f64,
    pixels_per_meter: f64,
}

#[derive(Debug, Serialize)]
struct MaterialsReport<'a> {
    area_m2: f64,
    category: Category,
    materials: &'a [MaterialLine],
}

pub fn run_manual(config: &Config, length: f64, width: f64, category: Category) -> Result<String, CliError> {
    let result = session::manual_measurement(length, width, category)?;
    match config.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => Ok(format_result(&result)),
    }
}

pub fn run_polygon(config: &Config, request: PolygonRequest) -> Result<String, CliError> {
    if request.points.is_empty() {
        return Err(CliError::NoPoints);
    }

    let mut session = Session::start(config.strategy());
    if let Some(capture) = request.capture {
        session.on_capture_ready(capture)?;
    }
    session.set_multiplier(request.multiplier)?;
    session.select_category(request.category);
    session.load_points(request.points)?;

    let result = session.calculate()?;
    let edges = session.distances();
    let pixels_per_meter = session.calibration().pixels_per_meter();
    session.end();

    match config.format {
        OutputFormat::Json => {
            Ok(serde_json::to_string_pretty(&PolygonReport { pixels_per_meter, edges: &edges, result: &result })?)
        }
        OutputFormat::Text => {
            let mut out = format!("Calibration: {pixels_per_meter:.2} px/m\n");
            out.push_str(&format_edges(&edges));
            out.push_str(&format_result(&result));
            Ok(out)
        }
    }
}

pub fn run_calibrate(config: &Config, capture: Resolution, multiplier: f64) -> Result<String, CliError> {
    let strategy = config.strategy();
    let baseline = strategy.baseline(capture)?;
    let calibration = Calibration::new(baseline, multiplier)?;
    let report = CalibrationReport {
        strategy: strategy.name(),
        width: capture.width,
        height: capture.height,
        baseline,
        multiplier,
        pixels_per_meter: calibration.pixels_per_meter(),
    };

    match config.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => Ok(format!(
            "{}x{} via {}: baseline {:.2} px/m, x{:.1} → {:.2} px/m (1 px = {})\n",
            report.width,
            report.height,
            report.strategy,
            report.baseline,
            report.multiplier,
            report.pixels_per_meter,
            format_distance(calibration.to_meters(1.0)),
        )),
    }
}

pub fn run_materials(config: &Config, area_m2: f64, category: Category) -> Result<String, CliError> {
    if !area_m2.is_finite() || area_m2 < 0.0 {
        return Err(measure::MeasureError::InvalidManualInput(format!("area must be a non-negative number, got {area_m2}")).into());
    }
    let lines = materials::estimate_materials(area_m2, category);
    match config.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&MaterialsReport { area_m2, category, materials: &lines })?),
        OutputFormat::Text => {
            let mut out = format!("{}: {area_m2:.2} m² (+10% overage)\n", category.label());
            out.push_str(&format_material_lines(&lines));
            Ok(out)
        }
    }
}

pub fn run_categories(config: &Config) -> Result<String, CliError> {
    match config.format {
        OutputFormat::Json => {
            let tables: Vec<_> = Category::ALL.iter().map(|c| (c.key(), c.materials())).collect();
            Ok(serde_json::to_string_pretty(&tables)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for category in Category::ALL {
                out.push_str(&format!("{} ({})\n", category.label(), category.key()));
                for m in category.materials() {
                    out.push_str(&format!("  {:<24} {:>8} {}/m²\n", m.display_name, m.coefficient_per_m2, m.unit));
                }
            }
            Ok(out)
        }
    }
}

// =============================================================
// Point input
// =============================================================

/// Parse whitespace- or newline-separated `x,y` pairs. `#` starts a comment.
pub fn parse_points(raw: &str) -> Result<Vec<Point>, CliError> {
    raw.lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(str::split_whitespace)
        .map(parse_point)
        .collect()
}

fn parse_point(token: &str) -> Result<Point, CliError> {
    let invalid = || CliError::InvalidPoint(token.to_owned());
    let (x, y) = token.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok(Point::new(x, y))
}

/// Read a point list from a file path, or stdin for `-`.
pub fn read_points(path: &str) -> Result<Vec<Point>, CliError> {
    let read_err = |err| CliError::ReadInput { path: path.to_owned(), err };
    let raw = if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        buf
    } else {
        fs::read_to_string(path).map_err(read_err)?
    };
    parse_points(&raw)
}

// =============================================================
// Text formatting
// =============================================================

fn format_result(result: &MeasurementResult) -> String {
    let mut out = format!(
        "{}: area {:.2} m², perimeter {:.2} m\n",
        result.category.label(),
        result.area_m2,
        result.perimeter_m
    );
    out.push_str(&format_material_lines(&result.materials));
    out
}

fn format_material_lines(lines: &[MaterialLine]) -> String {
    lines
        .iter()
        .map(|l| format!("  {:<24} {:>10.2} {}\n", l.name, l.amount, l.unit))
        .collect()
}

fn format_edges(edges: &[MeasuredPoint]) -> String {
    let n = edges.len();
    edges
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.distance_to_next.map(|d| format!("  P{} → P{}  {}\n", i + 1, (i + 1) % n + 1, format_distance(d))))
        .collect()
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;
