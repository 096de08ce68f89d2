//! # Change-Point Locator
//!
//! Penalized optimal segmentation of the temperature channel. The search
//! minimises
//!
//! ```text
//! sum over segments [a, b) of cost(a, b)  +  penalty * (number of segments)
//! ```
//!
//! with the PELT pruning rule, and reports the segment ends. By convention
//! the last breakpoint is the signal length, so a signal with one detected
//! change at `k` yields `[k, len]`.
//!
//! The operative **rupture point** is then picked from the end of that list
//! with [`select_rupture_point`].
//!
//! ```
//! use hlv::changepoint::{locate, select_rupture_point};
//!
//! let mut signal = vec![0.0; 100];
//! signal.extend(vec![10.0; 100]);
//! for (i, v) in signal.iter_mut().enumerate() {
//!     *v += 0.1 * (i as f64).sin();
//! }
//!
//! let breakpoints = locate(&signal, 50.0, 10)?;
//! assert_eq!(breakpoints, vec![100, 200]);
//! assert_eq!(select_rupture_point(&breakpoints, 2)?, 100);
//! # Ok::<(), hlv::changepoint::ChangepointError>(())
//! ```

mod cost;
mod error;
mod pelt;


pub use cost::{CostModel, NORMAL_VARIANCE_FLOOR};
pub use error::ChangepointError;
pub use pelt::Pelt;

/// Segment `signal` with the `normal` cost model and the default jump.
///
/// Returns strictly increasing breakpoints ending with `signal.len()`.
pub fn locate(
    signal: &[f64],
    penalty: f64,
    min_segment_size: usize,
) -> Result<Vec<usize>, ChangepointError> {
    Pelt::new()
        .with_cost_model(CostModel::Normal)
        .with_min_size(min_segment_size)
        .predict(signal, penalty)
}

/// Pick the breakpoint `n_input` positions from the end (1-based).
///
/// `n_input = 1` would select the length sentinel, which is rejected;
/// the default of 2 selects the last real change point.
pub fn select_rupture_point(breakpoints: &[usize], n_input: usize) -> Result<usize, ChangepointError> {
    if n_input == 0 {
        return Err(ChangepointError::ZeroPosition);
    }
    if n_input > breakpoints.len() {
        return Err(ChangepointError::NotEnoughChangePoints {
            requested: n_input,
            available: breakpoints.len(),
        });
    }
    if n_input == 1 {
        return Err(ChangepointError::SentinelSelected(breakpoints[breakpoints.len() - 1]));
    }
    Ok(breakpoints[breakpoints.len() - n_input])
}
