/// Errors that can occur during change-point search and selection
#[derive(Debug, thiserror::Error)]
pub enum ChangepointError {
    /// The signal has no samples
    #[error("Signal is empty")]
    EmptySignal,

    /// The signal contains NaN or infinite samples
    #[error("Signal contains a non-finite sample at index {0}")]
    NonFiniteSample(usize),

    /// The signal is shorter than a single admissible segment
    #[error("Signal of length {len} is shorter than the minimum segment size {min_size}")]
    SignalTooShort {
        /// Number of samples in the signal
        len: usize,
        /// Effective minimum segment size
        min_size: usize,
    },

    /// The penalty is negative or not finite
    #[error("Invalid penalty: {0}")]
    InvalidPenalty(f64),

    /// The search parameters are unusable (zero jump, zero minimum size)
    #[error("Invalid segmentation parameter: {0}")]
    InvalidParameter(String),

    /// `n_input` must count at least one entry from the end
    #[error("Change-point position must be at least 1 (counted from the end)")]
    ZeroPosition,

    /// `n_input` exceeds the number of detected boundaries
    #[error("Requested change point {requested} from the end, but only {available} boundaries were detected")]
    NotEnoughChangePoints {
        /// Position requested from the end (1-based)
        requested: usize,
        /// Number of entries in the change-point result
        available: usize,
    },

    /// `n_input = 1` selects the terminal length sentinel, which is not a sample
    #[error("Change point 1 from the end is the signal length ({0}), not a sample index; use 2 or more")]
    SentinelSelected(usize),
}
