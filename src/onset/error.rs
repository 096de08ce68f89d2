/// Errors that can occur while locating the tipping point
#[derive(Debug, thiserror::Error)]
pub enum OnsetError {
    /// `x` and `y` must be index-aligned
    #[error("Length mismatch: {x_len} x values but {y_len} y values")]
    LengthMismatch {
        /// Number of x values
        x_len: usize,
        /// Number of y values
        y_len: usize,
    },

    /// A chord needs two distinct end samples
    #[error("Window holds {0} sample(s); at least 2 are needed to draw a chord")]
    TooFewSamples(usize),

    /// The first and last x values coincide, so the chord slope is undefined
    #[error("Degenerate chord: first and last x values are both {0}")]
    DegenerateChord(f64),

    /// `top_n` selected no candidates
    #[error("At least one candidate must be considered")]
    ZeroCandidates,

    /// Every distance from the chord was NaN
    #[error("Every distance from the chord is NaN")]
    AllDistancesNan,
}
