use thiserror::Error;

/// Everything that can go wrong between reading a dataset file and answering
/// a recommendation or simulation query.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("Dataset is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Row {row}: {reason}")]
    Schema { row: usize, reason: String },

    #[error("Markdown {value:.3} outside valid range [{min:.2}, {max:.2}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("Model fit failed: {reason}")]
    Fit { reason: String },
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
