//! # Run Bundle
//!
//! Everything one analysis run leaves behind, packed into a single archive:
//!
//! ```text
//! <name>.zip
//! ├── 1_finding+ruptures.png          # both channels with shaded segments
//! ├── 2_P-T_and_rupturepoint.png      # P-T trajectory and the rupture point
//! ├── 3_Estimated_EQ_point(scaled).png  # extracted window with onset/rupture
//! ├── 4_Phase_EQ_Diagram.png          # overview and magnified onset
//! ├── Phase EQ Data.csv               # pressure,temperature of the window
//! └── Tipping points.csv              # Tipping point,Rupture point
//! ```
//!
//! Files are first written into a staging directory `<output_dir>/<name>`,
//! which must not already exist, then zipped to `<output_dir>/<name>.zip`
//! and the staging directory removed.

mod archive;
mod artifacts;
mod error;
mod plots;


use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::analysis::OnsetReport;
use crate::data::PtSeries;

pub use archive::{pack, pack_and_clean};
pub use artifacts::{write_phase_eq_data, write_tipping_points, PHASE_EQ_DATA, TIPPING_POINTS};
pub use error::OutputError;
pub use plots::{
    render_all, PlotFormat, ESTIMATE_PLOT, PHASE_EQ_PLOT, SEGMENTATION_PLOT, TRAJECTORY_PLOT,
};

/// Writes and packages the outputs of one run.
#[derive(Debug, Clone)]
pub struct RunBundle {
    output_dir: PathBuf,
    plot_format: PlotFormat,
}

impl RunBundle {
    /// Bundle written under `output_dir`, with PNG plots.
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            plot_format: PlotFormat::default(),
        }
    }

    /// Use `format` for the plots.
    pub fn with_plot_format(mut self, format: PlotFormat) -> Self {
        self.plot_format = format;
        self
    }

    /// Directory receiving the archive.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Archive path for a run called `name`.
    pub fn archive_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.zip"))
    }

    /// Entry names, in archive order.
    pub fn entry_names(&self) -> Vec<String> {
        let mut names: Vec<String> = [SEGMENTATION_PLOT, TRAJECTORY_PLOT, ESTIMATE_PLOT, PHASE_EQ_PLOT]
            .iter()
            .map(|stem| self.plot_format.file_name(stem))
            .collect();
        names.push(PHASE_EQ_DATA.to_string());
        names.push(TIPPING_POINTS.to_string());
        names
    }

    /// Write plots and tables for `report`, zip them as `<name>.zip` and
    /// return the archive path.
    pub fn write(&self, name: &str, series: &PtSeries, report: &OnsetReport) -> Result<PathBuf, OutputError> {
        if name.is_empty() || name == "." || name == ".." || name.contains(|c: char| c == '/' || c == '\\') {
            return Err(OutputError::InvalidName(name.to_string()));
        }

        let staging = self.output_dir.join(name);
        if staging.exists() {
            return Err(OutputError::AlreadyExists(staging));
        }
        fs::create_dir_all(&self.output_dir)?;
        let staging = StagingDir::create(staging)?;

        let archive = self.archive_path(name);
        self.fill_and_pack(&staging.path, &archive, series, report)?;
        info!("Results saved to {}", archive.display());
        Ok(archive)
    }

    fn fill_and_pack(
        &self,
        staging: &Path,
        archive: &Path,
        series: &PtSeries,
        report: &OnsetReport,
    ) -> Result<(), OutputError> {
        let mut entries = render_all(staging, self.plot_format, series, report)?;

        let file = BufWriter::new(File::create(staging.join(PHASE_EQ_DATA))?);
        write_phase_eq_data(file, series, report)?;
        entries.push(PHASE_EQ_DATA.to_string());

        let file = BufWriter::new(File::create(staging.join(TIPPING_POINTS))?);
        write_tipping_points(file, report)?;
        entries.push(TIPPING_POINTS.to_string());

        pack_and_clean(staging, &entries, archive)
    }
}

/// Staging directory, removed on drop so a failed or unwinding run leaves
/// nothing behind.
struct StagingDir {
    path: PathBuf,
}

impl StagingDir {
    fn create(path: PathBuf) -> Result<Self, OutputError> {
        fs::create_dir(&path)?;
        Ok(Self { path })
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        // a successful pack has already removed it
        if self.path.exists() {
            if let Err(e) = fs::remove_dir_all(&self.path) {
                warn!("Could not remove {}: {}", self.path.display(), e);
            }
        }
    }
}
