//! # Maximum-Deviation Point Finder
//!
//! Locates the onset ("tipping") point of a windowed pressure/temperature
//! trajectory: the sample lying farthest, perpendicularly, from the chord
//! that joins the first and last samples of the window.
//!
//! ```
//! use hlv::onset::find_tipping_point;
//!
//! let x = [0.0, 1.0, 2.0, 3.0, 4.0];
//! let y = [0.0, 1.0, 3.5, 3.0, 4.0];
//! assert_eq!(find_tipping_point(&x, &y, 100)?, 2);
//! # Ok::<(), hlv::onset::OnsetError>(())
//! ```

mod chord;
mod error;

pub use chord::Chord;
pub use error::OnsetError;

/// A sample and its perpendicular distance from the chord.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    /// Position within the window
    pub index: usize,
    /// Perpendicular distance from the chord
    pub distance: f64,
}

/// Distance of every sample from the endpoint chord, in window order.
pub fn chord_distances(x: &[f64], y: &[f64]) -> Result<Vec<f64>, OnsetError> {
    let chord = Chord::through_endpoints(x, y)?;
    Ok(x.iter()
        .zip(y)
        .map(|(&xi, &yi)| chord.distance(xi, yi))
        .collect())
}

/// The `top_n` samples farthest from the chord, largest first.
///
/// Equal distances keep window order. NaN distances are skipped; an infinite
/// distance ranks first. A `top_n` larger than the window considers every
/// sample. On success the result is never empty.
pub fn rank_deviations(x: &[f64], y: &[f64], top_n: usize) -> Result<Vec<Deviation>, OnsetError> {
    if top_n == 0 {
        return Err(OnsetError::ZeroCandidates);
    }

    let mut ranked: Vec<Deviation> = chord_distances(x, y)?
        .into_iter()
        .enumerate()
        .filter(|(_, distance)| !distance.is_nan())
        .map(|(index, distance)| Deviation { index, distance })
        .collect();

    if ranked.is_empty() {
        return Err(OnsetError::AllDistancesNan);
    }

    // stable sort keeps the first occurrence ahead on ties
    ranked.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    ranked.truncate(top_n);
    Ok(ranked)
}

/// Window index of the sample with the greatest distance from the chord.
///
/// `x` is the temperature and `y` the pressure of the extracted window.
///
/// # Errors
///
/// - [`OnsetError::DegenerateChord`] when `x[first] == x[last]`.
/// - [`OnsetError::ZeroCandidates`] when `top_n` is zero.
/// - Length mismatch, fewer than two samples, or every distance NaN.
pub fn find_tipping_point(x: &[f64], y: &[f64], top_n: usize) -> Result<usize, OnsetError> {
    Ok(rank_deviations(x, y, top_n)?[0].index)
}
