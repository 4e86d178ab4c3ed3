//! CLI configuration parsed from environment variables.
//!
//! Command-line flags override anything read here.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use measure::calibration::{CalibrationStrategy, DiagonalSpan, ResolutionTiers};
use measure::consts::DEFAULT_DIAGONAL_SPAN_M;
use measure::materials::Category;

use crate::error::CliError;

/// Which auto-calibration heuristic derives the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StrategyKind {
    /// Fixed pixels-per-meter per resolution tier.
    #[default]
    Tiers,
    /// Frame diagonal over a fixed real-world span.
    Diagonal,
}

impl FromStr for StrategyKind {
    type Err = CliError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "tiers" => Ok(Self::Tiers),
            "diagonal" => Ok(Self::Diagonal),
            other => Err(CliError::Config(format!(
                "unknown AREACALC_STRATEGY '{other}' (expected 'tiers' or 'diagonal')"
            ))),
        }
    }
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CliError::Config(format!("unknown AREACALC_FORMAT '{other}' (expected 'text' or 'json')"))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub strategy: StrategyKind,
    pub diagonal_span_m: f64,
    pub category: Category,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            diagonal_span_m: DEFAULT_DIAGONAL_SPAN_M,
            category: Category::default(),
            format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `AREACALC_STRATEGY`: `tiers` (default) or `diagonal`
    /// - `AREACALC_DIAGONAL_SPAN_M`: meters across the frame diagonal, default 15
    /// - `AREACALC_CATEGORY`: `floor` (default), `wall` or `ceiling`
    /// - `AREACALC_FORMAT`: `text` (default) or `json`
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let defaults = Self::default();
        let strategy = lookup("AREACALC_STRATEGY").map_or(Ok(defaults.strategy), |v| v.trim().parse())?;
        let diagonal_span_m = match lookup("AREACALC_DIAGONAL_SPAN_M") {
            Some(raw) => parse_span(&raw)?,
            None => defaults.diagonal_span_m,
        };
        let category = match lookup("AREACALC_CATEGORY") {
            Some(raw) => raw.parse()?,
            None => defaults.category,
        };
        let format = lookup("AREACALC_FORMAT").map_or(Ok(defaults.format), |v| v.trim().parse())?;

        Ok(Self { strategy, diagonal_span_m, category, format })
    }

    /// The configured calibration strategy.
    #[must_use]
    pub fn strategy(&self) -> Box<dyn CalibrationStrategy> {
        match self.strategy {
            StrategyKind::Tiers => Box::new(ResolutionTiers),
            StrategyKind::Diagonal => Box::new(DiagonalSpan { span_m: self.diagonal_span_m }),
        }
    }
}

fn parse_span(raw: &str) -> Result<f64, CliError> {
    match raw.trim().parse::<f64>() {
        Ok(span) if span.is_finite() && span > 0.0 => Ok(span),
        _ => Err(CliError::Config(format!("AREACALC_DIAGONAL_SPAN_M must be a positive number, got '{raw}'"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
