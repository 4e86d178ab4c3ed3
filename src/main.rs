mod commands;
mod config;
mod error;

use clap::{Args, Parser, Subcommand};
use measure::calibration::Resolution;
use measure::consts::DEFAULT_MULTIPLIER;
use measure::materials::Category;
use tracing::Level;

use crate::commands::PolygonRequest;
use crate::config::{Config, OutputFormat, StrategyKind};
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "areacalc", about = "Measure room surfaces and estimate renovation materials")]
struct Cli {
    /// Auto-calibration heuristic (env: AREACALC_STRATEGY).
    #[arg(long, global = true, value_enum)]
    strategy: Option<StrategyKind>,

    /// Meters spanned by the frame diagonal for the `diagonal` strategy (env: AREACALC_DIAGONAL_SPAN_M).
    #[arg(long, global = true)]
    diagonal_span: Option<f64>,

    /// Output format (env: AREACALC_FORMAT).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Log calibration and point events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rectangle from typed length and width.
    Manual(ManualCommand),
    /// Polygon from tapped capture-pixel coordinates.
    Polygon(PolygonCommand),
    /// Show the calibration derived for a capture resolution.
    Calibrate(CalibrateCommand),
    /// Material estimate for a known area.
    Materials(MaterialsCommand),
    /// List categories and their material coefficients.
    Categories,
}

#[derive(Args, Debug)]
struct ManualCommand {
    #[arg(long)]
    length: f64,
    #[arg(long)]
    width: f64,
    /// floor, wall or ceiling (env: AREACALC_CATEGORY).
    #[arg(long)]
    category: Option<Category>,
}

#[derive(Args, Debug)]
struct CaptureArgs {
    #[arg(long, requires = "capture_height")]
    capture_width: Option<u32>,
    #[arg(long, requires = "capture_width")]
    capture_height: Option<u32>,
}

impl CaptureArgs {
    fn resolution(&self) -> Option<Resolution> {
        Some(Resolution::new(self.capture_width?, self.capture_height?))
    }
}

#[derive(Args, Debug)]
struct PolygonCommand {
    /// Points as `x,y` pairs separated by spaces.
    #[arg(long, conflicts_with = "input")]
    points: Option<String>,
    /// File with one `x,y` pair per line, or `-` for stdin.
    #[arg(long)]
    input: Option<String>,
    #[command(flatten)]
    capture: CaptureArgs,
    #[arg(long, default_value_t = DEFAULT_MULTIPLIER)]
    multiplier: f64,
    #[arg(long)]
    category: Option<Category>,
}

#[derive(Args, Debug)]
struct CalibrateCommand {
    #[arg(long)]
    capture_width: u32,
    #[arg(long)]
    capture_height: u32,
    #[arg(long, default_value_t = DEFAULT_MULTIPLIER)]
    multiplier: f64,
}

#[derive(Args, Debug)]
struct MaterialsCommand {
    /// Surface area in square meters.
    #[arg(long)]
    area: f64,
    #[arg(long)]
    category: Option<Category>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let config = resolve_config(&cli)?;
    let rendered = match cli.command {
        Command::Manual(cmd) => {
            commands::run_manual(&config, cmd.length, cmd.width, cmd.category.unwrap_or(config.category))
        }
        Command::Polygon(cmd) => {
            let points = match (&cmd.points, &cmd.input) {
                (Some(raw), _) => commands::parse_points(raw)?,
                (None, Some(path)) => commands::read_points(path)?,
                (None, None) => return Err(CliError::NoPoints),
            };
            let request = PolygonRequest {
                points,
                capture: cmd.capture.resolution(),
                multiplier: cmd.multiplier,
                category: cmd.category.unwrap_or(config.category),
            };
            commands::run_polygon(&config, request)
        }
        Command::Calibrate(cmd) => commands::run_calibrate(
            &config,
            Resolution::new(cmd.capture_width, cmd.capture_height),
            cmd.multiplier,
        ),
        Command::Materials(cmd) => {
            commands::run_materials(&config, cmd.area, cmd.category.unwrap_or(config.category))
        }
        Command::Categories => commands::run_categories(&config),
    }?;

    print!("{rendered}");
    Ok(())
}

/// Environment first, then flags on top.
fn resolve_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = Config::from_env()?;
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    if let Some(span) = cli.diagonal_span {
        if !span.is_finite() || span <= 0.0 {
            return Err(CliError::Config(format!("--diagonal-span must be a positive number, got {span}")));
        }
        config.diagonal_span_m = span;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}
