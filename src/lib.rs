//! # hlv - Phase-Equilibrium Onset Extractor
//!
//! `hlv` finds the hydrate-liquid-vapour (HLV) equilibrium point in the
//! pressure/temperature log of a gas-hydrate experiment.
//!
//! ## Key Features
//!
//! - **Change-point search**: PELT segmentation of the temperature channel
//!   (Gaussian or L2 segment cost, minimum segment length, boundary grid)
//!   locates the rupture point where the run changes regime.
//!
//! - **Onset estimation**: inside a window around the rupture point, the
//!   sample farthest from the chord joining the window endpoints on the P-T
//!   plane is reported as the tipping (onset) point.
//!
//! - **Run bundle**: four diagnostic plots and two CSV tables, zipped per
//!   input file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hlv::prelude::*;
//!
//! let series = CsvLoader::new(SensorChannels::new(1, 1)).load_path("run_07.csv")?;
//!
//! let analysis = OnsetAnalysis::new(AnalysisConfig::default().step_region(500));
//! let report = analysis.run(&series)?;
//! println!(
//!     "onset at step {}: {:.2} bar, {:.2} °C",
//!     report.tipping_point, report.onset.pressure, report.onset.temperature
//! );
//!
//! let archive = RunBundle::new("results").write("run_07", &series, &report)?;
//! println!("wrote {}", archive.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`changepoint`]: PELT search and rupture-point selection
//! - [`onset`]: maximum-deviation (tipping point) finder
//! - [`data`]: sensor-channel layout, CSV loader and the P-T series
//! - [`analysis`]: the two steps above run over a loaded series
//! - [`selection`]: CSV discovery and the file-selection prompt
//! - [`output`]: plots, tables and the zipped run bundle
//!
//! ## Input Layout
//!
//! Logger exports carry a header row and a units row, then one sample per
//! row. Pressure sensor `p` is read from column `p + 1` and temperature
//! sensor `t` from column `t + 3`; raw temperatures are tenths of a degree.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod analysis;
pub mod changepoint;
pub mod data;
pub mod onset;
pub mod output;
pub mod selection;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::analysis::{AnalysisConfig, AnalysisError, OnsetAnalysis, OnsetReport};
    pub use crate::changepoint::{locate, select_rupture_point, ChangepointError, CostModel, Pelt};
    pub use crate::data::{CsvLoader, DataError, PtSeries, Sample, SensorChannels, Window};
    pub use crate::onset::{find_tipping_point, rank_deviations, Deviation, OnsetError};
    pub use crate::output::{OutputError, PlotFormat, RunBundle};
    pub use crate::selection::{
        list_csv_files, select_file, FileSelector, PresetSelector, PromptSelector, SelectionError,
    };
}
