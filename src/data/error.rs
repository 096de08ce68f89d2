/// Errors that can occur while loading pressure/temperature data
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// I/O error reading the input file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// The configured sensor channel maps past the last header column
    #[error("Missing {channel} column: index {index} requested but the header has {width} column(s)")]
    MissingColumn {
        /// Human-readable channel name, e.g. "pressure sensor 2"
        channel: String,
        /// Zero-based column index derived from the sensor number
        index: usize,
        /// Number of header columns
        width: usize,
    },

    /// A data row is too short to hold the column
    #[error("Line {line}: no value in column '{column}'")]
    MissingValue {
        /// Header name of the column
        column: String,
        /// 1-based line number in the file
        line: u64,
    },

    /// A cell could not be parsed as a number
    #[error("Line {line}: column '{column}' holds non-numeric value '{value}'")]
    NonNumeric {
        /// Header name of the column
        column: String,
        /// 1-based line number in the file
        line: u64,
        /// Offending cell text
        value: String,
    },

    /// No samples remain after skipping the units row
    #[error("No data rows found")]
    Empty,

    /// Pressure and temperature sequences differ in length
    #[error("Length mismatch: {pressure} pressure vs {temperature} temperature samples")]
    LengthMismatch {
        /// Number of pressure samples
        pressure: usize,
        /// Number of temperature samples
        temperature: usize,
    },

    /// The temperature scale factor must be finite and non-zero
    #[error("Invalid temperature scale: {0}")]
    InvalidScale(f64),
}
