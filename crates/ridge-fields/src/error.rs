/// Inputs on which the requested statistic is undefined.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateInputError {
    #[error("image has zero variance")]
    ConstantImage,
    #[error("segmentation mask selects no pixels")]
    EmptyMask,
    #[error("no block produced a ridge frequency inside the wavelength bounds")]
    NoValidFrequency,
}

/// Parameter values the pipeline cannot work with.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum InvalidConfigError {
    #[error("gaussian sigma must be positive (got {0})")]
    NonPositiveSigma(f64),
    #[error("block size must be positive (got {0})")]
    BadBlockSize(usize),
    #[error("peak window must be a positive odd integer (got {0})")]
    BadPeakWindow(usize),
    #[error("wavelength bounds must satisfy 0 < min <= max (got [{min}, {max}])")]
    BadWavelengthBounds { min: f64, max: f64 },
    #[error("{what}: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    ShapeMismatch {
        what: &'static str,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },
}

/// Any error surfaced by the analysis pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error(transparent)]
    DegenerateInput(#[from] DegenerateInputError),
    #[error(transparent)]
    InvalidConfig(#[from] InvalidConfigError),
}
