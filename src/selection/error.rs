use std::path::PathBuf;

/// Errors that can occur while choosing the input file
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// Reading the directory or the terminal failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The directory holds no CSV files
    #[error("No CSV files found in {}", .0.display())]
    NoCsvFiles(PathBuf),

    /// The answer was not a file number
    #[error("Invalid file number: '{0}'")]
    InvalidIndex(String),

    /// The file number is outside the listed range
    #[error("File number {index} is out of range (0..{len})")]
    IndexOutOfRange {
        /// Number given
        index: usize,
        /// Number of listed files
        len: usize,
    },

    /// Input ended before an answer was given
    #[error("No answer given")]
    NoAnswer,
}
