use measure::MeasureError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Measure(#[from] MeasureError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to read points from {path}: {err}")]
    ReadInput { path: String, err: std::io::Error },
    #[error("invalid point {0:?}; expected `x,y` in capture pixels")]
    InvalidPoint(String),
    #[error("no points given; pass --points or --input")]
    NoPoints,
    #[error("invalid JSON output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
