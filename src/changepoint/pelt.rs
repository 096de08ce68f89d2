//! PELT (Pruned Exact Linear Time) search over a 1-D signal.

use log::debug;

use super::cost::{CostModel, SegmentCost};
use super::ChangepointError;

/// PELT search configuration.
///
/// # Defaults
///
/// - `cost_model`: [`CostModel::Normal`]
/// - `min_size`: `2`
/// - `jump`: `5`
#[derive(Debug, Clone, PartialEq)]
pub struct Pelt {
    cost_model: CostModel,
    min_size: usize,
    jump: usize,
}

impl Pelt {
    /// Construct a search with default settings.
    pub const fn new() -> Self {
        Self {
            cost_model: CostModel::Normal,
            min_size: 2,
            jump: 5,
        }
    }

    /// Set the segment cost model.
    pub const fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    /// Set the minimum number of samples in a segment.
    ///
    /// Raised to the cost model's own minimum when smaller.
    pub const fn with_min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set the spacing of admissible boundaries.
    ///
    /// - `jump = 1` checks every prior index and finds the exact optimum.
    /// - `jump > 1` only considers multiples of `jump`, trading exactness for speed.
    pub const fn with_jump(mut self, jump: usize) -> Self {
        self.jump = jump;
        self
    }

    /// Configured cost model.
    pub fn cost_model(&self) -> CostModel {
        self.cost_model
    }

    /// Minimum segment size actually enforced.
    pub fn effective_min_size(&self) -> usize {
        self.min_size.max(self.cost_model.min_size())
    }

    /// Configured jump.
    pub fn jump(&self) -> usize {
        self.jump
    }

    /// Segment `signal` and return the sorted breakpoints.
    ///
    /// The last entry is always `signal.len()`.
    ///
    /// # Errors
    ///
    /// - When the signal is empty, contains non-finite values or is shorter
    ///   than the minimum segment size.
    /// - When the penalty is negative or not finite, or `jump` is zero.
    pub fn predict(&self, signal: &[f64], penalty: f64) -> Result<Vec<usize>, ChangepointError> {
        let n = signal.len();
        if n == 0 {
            return Err(ChangepointError::EmptySignal);
        }
        if let Some(idx) = signal.iter().position(|v| !v.is_finite()) {
            return Err(ChangepointError::NonFiniteSample(idx));
        }
        if !penalty.is_finite() || penalty < 0.0 {
            return Err(ChangepointError::InvalidPenalty(penalty));
        }
        if self.jump == 0 {
            return Err(ChangepointError::InvalidParameter(
                "jump must be at least 1".to_string(),
            ));
        }

        let min_size = self.effective_min_size();
        if n < min_size {
            return Err(ChangepointError::SignalTooShort { len: n, min_size });
        }

        let cost = SegmentCost::new(signal, self.cost_model);

        // best[t]: optimal penalized cost of signal[0..t]; NaN marks "no partition"
        let mut best = vec![f64::NAN; n + 1];
        let mut last_bkp = vec![0usize; n + 1];
        best[0] = 0.0;

        let mut ends: Vec<usize> = (0..n)
            .step_by(self.jump)
            .filter(|&k| k >= min_size)
            .collect();
        if ends.last() != Some(&n) {
            ends.push(n);
        }

        let mut admissible: Vec<usize> = Vec::new();
        let mut totals: Vec<f64> = Vec::new();

        for &bkp in &ends {
            // Grid points below min_size (other than 0) never own a partition.
            let newest = (bkp - min_size) / self.jump * self.jump;
            if !best[newest].is_nan() && admissible.last() != Some(&newest) {
                admissible.push(newest);
            }

            totals.clear();
            let mut best_total = f64::INFINITY;
            let mut best_start = 0;
            for &start in &admissible {
                let total = best[start] + cost.error(start, bkp) + penalty;
                totals.push(total);
                // strict: the earliest start wins ties
                if total < best_total {
                    best_total = total;
                    best_start = start;
                }
            }

            best[bkp] = best_total;
            last_bkp[bkp] = best_start;

            // Pruning: a start that cannot beat the optimum plus one penalty never will.
            let mut kept = 0;
            for i in 0..admissible.len() {
                if totals[i] <= best_total + penalty {
                    admissible[kept] = admissible[i];
                    kept += 1;
                }
            }
            admissible.truncate(kept);
        }

        let mut breakpoints = Vec::new();
        let mut t = n;
        while t > 0 {
            breakpoints.push(t);
            t = last_bkp[t];
        }
        breakpoints.reverse();

        debug!(
            "PELT ({} cost, min_size={}, jump={}, pen={}) found {} segment(s) in {} samples",
            self.cost_model,
            min_size,
            self.jump,
            penalty,
            breakpoints.len(),
            n
        );

        Ok(breakpoints)
    }
}

impl Default for Pelt {
    fn default() -> Self {
        Self::new()
    }
}
