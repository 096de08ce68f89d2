//! # Onset Analysis
//!
//! Runs the two core steps over a loaded [`PtSeries`]:
//!
//! 1. PELT segmentation of the temperature channel and selection of the
//!    rupture point `n_input` entries from the end of the breakpoint list;
//! 2. the maximum-deviation search over the window of `step_region` samples
//!    either side of the rupture point, with temperature on the x axis and
//!    pressure on the y axis.
//!
//! The analysis is pure: it reads the series and returns an [`OnsetReport`].

mod error;

#[cfg(test)]
mod tests;

use log::{debug, info};

use crate::changepoint::{select_rupture_point, CostModel, Pelt};
use crate::data::{PtSeries, Sample, Window};
use crate::onset::{rank_deviations, Deviation};

pub use error::AnalysisError;

/// Default PELT penalty.
pub const DEFAULT_PENALTY: f64 = 1200.0;
/// Default minimum segment length.
pub const DEFAULT_MIN_SIZE: usize = 10;
/// Default boundary grid spacing.
pub const DEFAULT_JUMP: usize = 5;
/// Default position of the rupture point, counted from the end of the breakpoints.
pub const DEFAULT_N_INPUT: usize = 2;
/// Default half-width of the extracted window.
pub const DEFAULT_STEP_REGION: usize = 1000;
/// Default number of deviation candidates kept.
pub const DEFAULT_TOP_N: usize = 100;

/// Analysis parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Penalty per segment in the PELT objective
    pub penalty: f64,
    /// Minimum samples per segment
    pub min_size: usize,
    /// Boundary grid spacing
    pub jump: usize,
    /// Segment cost model
    pub cost_model: CostModel,
    /// Breakpoint position from the end used as the rupture point
    pub n_input: usize,
    /// Half-width of the window around the rupture point
    pub step_region: usize,
    /// Deviation candidates kept for ranking
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            penalty: DEFAULT_PENALTY,
            min_size: DEFAULT_MIN_SIZE,
            jump: DEFAULT_JUMP,
            cost_model: CostModel::Normal,
            n_input: DEFAULT_N_INPUT,
            step_region: DEFAULT_STEP_REGION,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl AnalysisConfig {
    /// Set the penalty.
    pub fn penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    /// Set the minimum segment length.
    pub fn min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set the boundary grid spacing.
    pub fn jump(mut self, jump: usize) -> Self {
        self.jump = jump;
        self
    }

    /// Set the cost model.
    pub fn cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    /// Set which breakpoint, from the end, is the rupture point.
    pub fn n_input(mut self, n_input: usize) -> Self {
        self.n_input = n_input;
        self
    }

    /// Set the window half-width.
    pub fn step_region(mut self, step_region: usize) -> Self {
        self.step_region = step_region;
        self
    }

    /// Set the number of ranked candidates.
    pub fn top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    fn pelt(&self) -> Pelt {
        Pelt::new()
            .with_cost_model(self.cost_model)
            .with_min_size(self.min_size)
            .with_jump(self.jump)
    }
}

/// Outcome of one analysis run. All indices are absolute series indices.
#[derive(Debug, Clone, PartialEq)]
pub struct OnsetReport {
    /// PELT breakpoints, ending with the series length
    pub breakpoints: Vec<usize>,
    /// Selected rupture point
    pub rupture_point: usize,
    /// Extracted window around the rupture point
    pub window: Window,
    /// Onset (tipping) point
    pub tipping_point: usize,
    /// Ranked deviation candidates, largest first
    pub candidates: Vec<Deviation>,
    /// Reading at the rupture point
    pub rupture: Sample,
    /// Reading at the onset point
    pub onset: Sample,
}

/// Runs the onset analysis with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct OnsetAnalysis {
    config: AnalysisConfig,
}

impl OnsetAnalysis {
    /// Create an analysis with `config`.
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyse `series`.
    pub fn run(&self, series: &PtSeries) -> Result<OnsetReport, AnalysisError> {
        let config = &self.config;

        info!("Initialize PELT search and find the rupture point");
        let breakpoints = config.pelt().predict(series.temperature(), config.penalty)?;
        debug!("Breakpoints: {:?}", breakpoints);

        let rupture_point = select_rupture_point(&breakpoints, config.n_input)?;
        info!(
            "Rupture point: step {} ({} of {} breakpoints from the end)",
            rupture_point,
            config.n_input,
            breakpoints.len()
        );

        let window = series.window(rupture_point, config.step_region);
        if window.is_clipped() {
            debug!(
                "Window {}..{} clipped to the series bounds (requested +/-{} around {})",
                window.start(), window.end(), config.step_region, rupture_point
            );
        }

        info!("Finding the phase EQ point...");
        let mut candidates = rank_deviations(
            series.temperature_in(window),
            series.pressure_in(window),
            config.top_n,
        )?;
        for candidate in &mut candidates {
            candidate.index = window.absolute(candidate.index);
        }

        // the ranking is never empty and every index lies inside the window
        let tipping_point = candidates[0].index;
        let rupture = series.sample_at(rupture_point);
        let onset = series.sample_at(tipping_point);

        info!(
            "Tipping point: step {} ({:.3} °C, {:.3} bar)",
            tipping_point, onset.temperature, onset.pressure
        );

        Ok(OnsetReport {
            breakpoints,
            rupture_point,
            window,
            tipping_point,
            candidates,
            rupture,
            onset,
        })
    }
}
