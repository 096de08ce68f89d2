use anyhow::Result;
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

use hlv::analysis::{AnalysisConfig, DEFAULT_N_INPUT, DEFAULT_PENALTY, DEFAULT_STEP_REGION};
use hlv::changepoint::CostModel;
use hlv::data::{SensorChannels, DEFAULT_TEMPERATURE_SCALE};
use hlv::output::PlotFormat;

mod analyze;
mod config;

pub use analyze::Settings;
use config::Config;

/// hlv - phase-equilibrium onset extractor for gas hydrate experiments
///
/// Lists the CSV exports in a directory, asks which one to analyse, finds the
/// rupture point of the temperature channel and the onset (tipping) point on
/// the P-T plane, and zips four plots and two tables as <file>.zip.
#[derive(Parser, Debug)]
#[command(name = "hlv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pressure sensor number (default: 1)
    #[arg(short = 'p', long = "pnum", value_name = "N")]
    pnum: Option<usize>,

    /// Temperature sensor number (default: 1)
    #[arg(short = 't', long = "tnum", value_name = "N")]
    tnum: Option<usize>,

    /// Breakpoint used as the rupture point, counted from the end (default: 2)
    #[arg(short = 'n', long = "ninput", value_name = "N")]
    n_input: Option<usize>,

    /// Steps analysed either side of the rupture point (default: 1000)
    #[arg(short = 's', long = "stepreg", value_name = "STEPS")]
    step_region: Option<usize>,

    /// Penalty value for the PELT search (default: 1200)
    #[arg(short = 'P', long = "pen", value_name = "PENALTY")]
    penalty: Option<f64>,

    /// Directory containing the CSV files (default: ./)
    #[arg(short = 'd', long = "dirloc", value_name = "DIR")]
    dirloc: Option<PathBuf>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory receiving the zip archive (default: ./)
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Answer the file-number prompt with this index
    #[arg(short = 'f', long, value_name = "INDEX")]
    file_index: Option<usize>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,

    /// Log debug details
    #[arg(long, conflicts_with = "quiet")]
    verbose: bool,

    /// Log warnings and errors only
    #[arg(short = 'q', long)]
    quiet: bool,

    // === Advanced tuning flags ===
    /// Minimum segment length for the PELT search (default: 10)
    #[arg(long, value_name = "SAMPLES")]
    min_size: Option<usize>,

    /// Spacing of candidate boundaries; 1 searches every sample (default: 5)
    #[arg(long, value_name = "SAMPLES")]
    jump: Option<usize>,

    /// Deviation candidates ranked around the onset (default: 100)
    #[arg(long, value_name = "N")]
    top_n: Option<usize>,

    /// Segment cost model (default: normal)
    #[arg(long, value_enum)]
    model: Option<ModelArg>,

    /// Divisor applied to raw temperatures (default: 10)
    #[arg(long, value_name = "DIVISOR")]
    temp_scale: Option<f64>,

    /// Plot image format (default: png)
    #[arg(long, value_enum)]
    plot_format: Option<PlotFormatArg>,
}

/// Segment cost model.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModelArg {
    /// Gaussian segments, sensitive to mean and variance shifts
    Normal,
    /// Squared deviations from the segment mean
    L2,
}

impl From<ModelArg> for CostModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Normal => CostModel::Normal,
            ModelArg::L2 => CostModel::L2,
        }
    }
}

/// Plot image format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PlotFormatArg {
    /// Raster PNG
    Png,
    /// Vector SVG
    Svg,
}

impl From<PlotFormatArg> for PlotFormat {
    fn from(arg: PlotFormatArg) -> Self {
        match arg {
            PlotFormatArg::Png => PlotFormat::Png,
            PlotFormatArg::Svg => PlotFormat::Svg,
        }
    }
}

/// Command-line definition with `-v/--version` in place of clap's `-V`.
fn command() -> clap::Command {
    Cli::command().disable_version_flag(true).arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Print version"),
    )
}

/// Parse arguments, exiting with usage on error.
pub fn parse() -> Cli {
    try_parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}

/// Parse `args` (program name first).
pub fn try_parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(args)?;
    Cli::from_arg_matches(&matches)
}

impl Cli {
    /// Log filter derived from `--verbose` / `--quiet`.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Merge flags, the config file and defaults, in that order of precedence.
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        Ok(self.merge(file))
    }

    fn merge(&self, file: Config) -> Settings {
        let defaults = AnalysisConfig::default();
        let section = file.analysis;

        let channels = SensorChannels::new(
            self.pnum.or(section.pnum).unwrap_or(1),
            self.tnum.or(section.tnum).unwrap_or(1),
        );

        let analysis = AnalysisConfig::default()
            .penalty(self.penalty.or(section.penalty).unwrap_or(DEFAULT_PENALTY))
            .n_input(self.n_input.or(section.n_input).unwrap_or(DEFAULT_N_INPUT))
            .step_region(self.step_region.or(section.step_region).unwrap_or(DEFAULT_STEP_REGION))
            .min_size(self.min_size.or(section.min_size).unwrap_or(defaults.min_size))
            .jump(self.jump.or(section.jump).unwrap_or(defaults.jump))
            .top_n(self.top_n.or(section.top_n).unwrap_or(defaults.top_n))
            .cost_model(
                self.model
                    .map(CostModel::from)
                    .or(section.model)
                    .unwrap_or(defaults.cost_model),
            );

        Settings {
            channels,
            analysis,
            temperature_scale: self
                .temp_scale
                .or(section.temperature_scale)
                .unwrap_or(DEFAULT_TEMPERATURE_SCALE),
            input_dir: self
                .dirloc
                .clone()
                .or(section.input_dir)
                .unwrap_or_else(|| PathBuf::from("./")),
            output_dir: self
                .output_dir
                .clone()
                .or(file.output.dir)
                .unwrap_or_else(|| PathBuf::from("./")),
            plot_format: self
                .plot_format
                .map(PlotFormat::from)
                .or(file.output.plot_format)
                .unwrap_or_default(),
            file_index: self.file_index,
            assume_yes: self.yes,
        }
    }
}

pub fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;
    analyze::run(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let cli = try_parse_from(["hlv"]).unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.channels, SensorChannels::new(1, 1));
        assert_eq!(settings.analysis, AnalysisConfig::default());
        assert_eq!(settings.analysis.penalty, 1200.0);
        assert_eq!(settings.analysis.n_input, 2);
        assert_eq!(settings.analysis.step_region, 1000);
        assert_eq!(settings.temperature_scale, 10.0);
        assert_eq!(settings.input_dir, PathBuf::from("./"));
        assert_eq!(settings.plot_format, PlotFormat::Png);
        assert_eq!(settings.file_index, None);
        assert!(!settings.assume_yes);
        assert_eq!(cli.log_level(), "info");
    }

    #[test]
    fn test_short_flags() {
        let cli = try_parse_from([
            "hlv", "-p", "2", "-t", "4", "-n", "3", "-s", "500", "-P", "900", "-d", "data/", "-f",
            "1", "-y", "-q",
        ])
        .unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.channels, SensorChannels::new(2, 4));
        assert_eq!(settings.analysis.n_input, 3);
        assert_eq!(settings.analysis.step_region, 500);
        assert_eq!(settings.analysis.penalty, 900.0);
        assert_eq!(settings.input_dir, PathBuf::from("data/"));
        assert_eq!(settings.file_index, Some(1));
        assert!(settings.assume_yes);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_long_flags() {
        let cli = try_parse_from([
            "hlv",
            "--pnum",
            "2",
            "--pen",
            "1500.5",
            "--min-size",
            "20",
            "--jump",
            "1",
            "--top-n",
            "10",
            "--model",
            "l2",
            "--temp-scale",
            "1",
            "--plot-format",
            "svg",
            "--output-dir",
            "out",
            "--verbose",
        ])
        .unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.channels.pressure, 2);
        assert_eq!(settings.analysis.penalty, 1500.5);
        assert_eq!(settings.analysis.min_size, 20);
        assert_eq!(settings.analysis.jump, 1);
        assert_eq!(settings.analysis.top_n, 10);
        assert_eq!(settings.analysis.cost_model, CostModel::L2);
        assert_eq!(settings.temperature_scale, 1.0);
        assert_eq!(settings.plot_format, PlotFormat::Svg);
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = Config::from_str(
            r#"
            [analysis]
            pnum = 2
            penalty = 500.0
            step_region = 300

            [output]
            plot_format = "svg"
            "#,
        )
        .unwrap();
        let cli = try_parse_from(["hlv", "-P", "800"]).unwrap();
        let settings = cli.merge(file);
        assert_eq!(settings.analysis.penalty, 800.0);
        assert_eq!(settings.analysis.step_region, 300);
        assert_eq!(settings.channels.pressure, 2);
        assert_eq!(settings.plot_format, PlotFormat::Svg);
    }

    #[test]
    fn test_lowercase_v_prints_version() {
        let err = try_parse_from(["hlv", "-v"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        let err = try_parse_from(["hlv", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(try_parse_from(["hlv", "--verbose", "-q"]).is_err());
    }

    #[test]
    fn test_non_numeric_penalty_rejected() {
        let err = try_parse_from(["hlv", "-P", "high"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
