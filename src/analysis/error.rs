use crate::changepoint::ChangepointError;
use crate::onset::OnsetError;

/// Errors that can occur during an onset analysis run
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Change-point search or rupture-point selection failed
    #[error("Change-point error: {0}")]
    Changepoint(#[from] ChangepointError),

    /// Tipping-point search failed
    #[error("Tipping-point error: {0}")]
    Onset(#[from] OnsetError),
}
