//! Segment cost models for the PELT search.
//!
//! Costs are evaluated in O(1) per segment from prefix sums of the signal
//! and of its square. The signal is centred on its global mean before the
//! sums are accumulated so long, offset series (temperatures around 280 K,
//! pressures in the tens of bar) do not lose precision in `sum_sq - n*mean^2`.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Diagonal term added to the segment variance by the `normal` model.
///
/// Keeps constant segments at a finite cost of `n * ln(1e-6)`.
pub const NORMAL_VARIANCE_FLOOR: f64 = 1e-6;

/// Segment cost model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostModel {
    /// Gaussian log-likelihood: `n * ln(var + 1e-6)`.
    ///
    /// Reacts to changes in both mean and variance.
    #[default]
    Normal,
    /// Sum of squared deviations from the segment mean.
    L2,
}

impl CostModel {
    /// Smallest segment the model can score.
    pub fn min_size(&self) -> usize {
        match self {
            CostModel::Normal => 2,
            CostModel::L2 => 1,
        }
    }

    /// Model name as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            CostModel::Normal => "normal",
            CostModel::L2 => "l2",
        }
    }
}

impl fmt::Display for CostModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(CostModel::Normal),
            "l2" => Ok(CostModel::L2),
            other => Err(format!("unknown cost model '{other}' (expected normal or l2)")),
        }
    }
}

/// Prefix sums over a centred signal.
#[derive(Debug, Clone)]
pub(crate) struct SegmentCost {
    model: CostModel,
    cum_sum: Vec<f64>,
    cum_sum_sq: Vec<f64>,
}

impl SegmentCost {
    pub(crate) fn new(signal: &[f64], model: CostModel) -> Self {
        let n = signal.len();
        let offset = if n == 0 {
            0.0
        } else {
            signal.iter().sum::<f64>() / n as f64
        };

        let mut cum_sum = Vec::with_capacity(n + 1);
        let mut cum_sum_sq = Vec::with_capacity(n + 1);
        cum_sum.push(0.0);
        cum_sum_sq.push(0.0);

        let (mut acc, mut acc_sq) = (0.0, 0.0);
        for &value in signal {
            let centred = value - offset;
            acc += centred;
            acc_sq += centred * centred;
            cum_sum.push(acc);
            cum_sum_sq.push(acc_sq);
        }

        Self {
            model,
            cum_sum,
            cum_sum_sq,
        }
    }

    /// Sum of squared deviations from the mean of `signal[start..end]`.
    fn scatter(&self, start: usize, end: usize) -> f64 {
        let n = (end - start) as f64;
        let sum = self.cum_sum[end] - self.cum_sum[start];
        let sum_sq = self.cum_sum_sq[end] - self.cum_sum_sq[start];
        (sum_sq - sum * sum / n).max(0.0)
    }

    /// Cost of the segment `signal[start..end]`.
    pub(crate) fn error(&self, start: usize, end: usize) -> f64 {
        debug_assert!(end > start);
        let scatter = self.scatter(start, end);
        match self.model {
            CostModel::L2 => scatter,
            CostModel::Normal => {
                let n = (end - start) as f64;
                let variance = scatter / n;
                n * (variance + NORMAL_VARIANCE_FLOOR).ln()
            }
        }
    }
}
