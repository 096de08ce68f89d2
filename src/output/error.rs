use std::path::PathBuf;

/// Errors that can occur while writing the run bundle
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Filesystem error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// ZIP packaging error
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Plot rendering error
    #[error("Plot error: {0}")]
    PlotError(String),

    /// The staging directory is left over from an earlier run
    #[error("Staging directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// The run name cannot be used as a file name
    #[error("Invalid run name: '{0}'")]
    InvalidName(String),
}
