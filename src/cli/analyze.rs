use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use hlv::analysis::{AnalysisConfig, OnsetAnalysis};
use hlv::data::{CsvLoader, SensorChannels};
use hlv::output::{PlotFormat, RunBundle};
use hlv::selection::{list_csv_files, select_file, FileSelector, PromptSelector, SelectionError};

/// Fully resolved run settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub channels: SensorChannels,
    pub analysis: AnalysisConfig,
    pub temperature_scale: f64,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub plot_format: PlotFormat,
    pub file_index: Option<usize>,
    pub assume_yes: bool,
}

/// Select, analyse and bundle one CSV export through the terminal prompts.
pub fn run(settings: Settings) -> Result<()> {
    let mut selector = PromptSelector::stdio()
        .with_preset_index(settings.file_index)
        .with_assume_yes(settings.assume_yes);
    run_with(&settings, &mut selector)?;
    Ok(())
}

/// Run with an injected selector; returns the archive path, or `None` when
/// there was nothing to do.
pub fn run_with<S: FileSelector>(settings: &Settings, selector: &mut S) -> Result<Option<PathBuf>> {
    let config = &settings.analysis;
    info!("Pressure sensor: {}", settings.channels.pressure);
    info!("Temperature sensor: {}", settings.channels.temperature);
    info!("n_input: {}", config.n_input);
    info!("step_region: {}", config.step_region);
    info!("Penalty: {}", config.penalty);
    info!("Directory: '{}'", settings.input_dir.display());

    let files = match list_csv_files(&settings.input_dir) {
        Ok(files) => files,
        Err(SelectionError::NoCsvFiles(dir)) => {
            warn!(
                "There is no csv file in {}. Please check the directory location.",
                dir.display()
            );
            return Ok(None);
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to list {}", settings.input_dir.display())
            })
        }
    };

    let Some(path) = select_file(selector, &files).context("File selection failed")? else {
        info!("The program has been stopped.");
        return Ok(None);
    };
    info!("Using {}", path.display());

    let series = CsvLoader::new(settings.channels)
        .with_temperature_scale(settings.temperature_scale)
        .load_path(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    info!(
        "Loaded {} samples ({} / {})",
        series.len(),
        series.pressure_label(),
        series.temperature_label()
    );

    let report = OnsetAnalysis::new(config.clone())
        .run(&series)
        .context("Onset analysis failed")?;

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .with_context(|| format!("No file name in {}", path.display()))?;

    let archive = RunBundle::new(&settings.output_dir)
        .with_plot_format(settings.plot_format)
        .write(&name, &series, &report)
        .context("Failed to write the run bundle")?;

    info!(
        "Phase EQ point: step {}, {} bar, {} °C (rupture point: step {})",
        report.tipping_point, report.onset.pressure, report.onset.temperature, report.rupture_point
    );
    info!("Make sure this is the intended phase EQ point; if not, re-run with other parameters.");
    Ok(Some(archive))
}
