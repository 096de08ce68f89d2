//! TOML configuration file support.
//!
//! Settings that stay the same across runs can live in a config file
//! instead of on the command line:
//!
//! ```toml
//! # hlv.toml
//! [analysis]
//! pnum = 2
//! tnum = 3
//! n_input = 2
//! step_region = 800
//! penalty = 1500.0
//! model = "normal"
//! input_dir = "./exports"
//!
//! [output]
//! dir = "./results"
//! plot_format = "svg"
//! ```
//!
//! Command-line flags override file values; file values override defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use hlv::changepoint::CostModel;
use hlv::output::PlotFormat;

/// Root configuration structure for hlv.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Input and analysis settings.
    #[serde(default)]
    pub analysis: AnalysisSection,

    /// Output settings.
    #[serde(default)]
    pub output: OutputSection,
}

/// The `[analysis]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSection {
    /// Pressure sensor number.
    pub pnum: Option<usize>,

    /// Temperature sensor number.
    pub tnum: Option<usize>,

    /// Breakpoint position, from the end, used as the rupture point.
    pub n_input: Option<usize>,

    /// Half-width of the window around the rupture point.
    pub step_region: Option<usize>,

    /// PELT penalty.
    pub penalty: Option<f64>,

    /// Minimum segment length.
    pub min_size: Option<usize>,

    /// Boundary grid spacing.
    pub jump: Option<usize>,

    /// Number of ranked deviation candidates.
    pub top_n: Option<usize>,

    /// Segment cost model.
    pub model: Option<CostModel>,

    /// Divisor applied to raw temperatures.
    pub temperature_scale: Option<f64>,

    /// Directory searched for CSV files.
    pub input_dir: Option<PathBuf>,
}

/// The `[output]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Directory receiving the zip archive.
    pub dir: Option<PathBuf>,

    /// Plot image format.
    pub plot_format: Option<PlotFormat>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [analysis]
            pnum = 2
            tnum = 3
            n_input = 3
            step_region = 800
            penalty = 1500.0
            min_size = 20
            jump = 1
            top_n = 50
            model = "l2"
            temperature_scale = 1.0
            input_dir = "./exports"

            [output]
            dir = "./results"
            plot_format = "svg"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.analysis.pnum, Some(2));
        assert_eq!(config.analysis.tnum, Some(3));
        assert_eq!(config.analysis.n_input, Some(3));
        assert_eq!(config.analysis.step_region, Some(800));
        assert_eq!(config.analysis.penalty, Some(1500.0));
        assert_eq!(config.analysis.min_size, Some(20));
        assert_eq!(config.analysis.jump, Some(1));
        assert_eq!(config.analysis.top_n, Some(50));
        assert_eq!(config.analysis.model, Some(CostModel::L2));
        assert_eq!(config.analysis.temperature_scale, Some(1.0));
        assert_eq!(config.analysis.input_dir, Some(PathBuf::from("./exports")));
        assert_eq!(config.output.dir, Some(PathBuf::from("./results")));
        assert_eq!(config.output.plot_format, Some(PlotFormat::Svg));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [analysis]
            penalty = 900.0
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.analysis.penalty, Some(900.0));
        assert_eq!(config.analysis.step_region, None);
        assert_eq!(config.output.plot_format, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.analysis.pnum, None);
        assert_eq!(config.output.dir, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let toml = r#"
            [analysis]
            penalty = 900.0
            penatly = 1.0
        "#;
        assert!(Config::from_str(toml).is_err());
    }

    #[test]
    fn test_unknown_model_rejected() {
        let toml = r#"
            [analysis]
            model = "rbf"
        "#;
        assert!(Config::from_str(toml).is_err());
    }
}
