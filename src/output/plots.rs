use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Deserialize;

use crate::analysis::OnsetReport;
use crate::data::PtSeries;

use super::OutputError;

/// Segmentation overview, both channels against steps.
pub const SEGMENTATION_PLOT: &str = "1_finding+ruptures";
/// P-T trajectory with the rupture point.
pub const TRAJECTORY_PLOT: &str = "2_P-T_and_rupturepoint";
/// Extracted window with the onset and rupture points.
pub const ESTIMATE_PLOT: &str = "3_Estimated_EQ_point(scaled)";
/// Overview and magnified view of the onset point.
pub const PHASE_EQ_PLOT: &str = "4_Phase_EQ_Diagram";

const SEGMENT_SHADES: [RGBColor; 2] = [RGBColor(70, 130, 180), RGBColor(244, 164, 96)];

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Image format of the diagnostic plots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotFormat {
    /// Raster PNG
    #[default]
    Png,
    /// Vector SVG
    Svg,
}

impl PlotFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            PlotFormat::Png => "png",
            PlotFormat::Svg => "svg",
        }
    }

    /// `stem` with this format's extension.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }
}

impl fmt::Display for PlotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for PlotFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(PlotFormat::Png),
            "svg" => Ok(PlotFormat::Svg),
            other => Err(format!("unknown plot format '{other}' (expected png or svg)")),
        }
    }
}

/// Render all four plots into `dir`, returning their file names in order.
pub fn render_all(
    dir: &Path,
    format: PlotFormat,
    series: &PtSeries,
    report: &OnsetReport,
) -> Result<Vec<String>, OutputError> {
    let figures: [(&str, (u32, u32), Figure); 4] = [
        (SEGMENTATION_PLOT, (1280, 900), Figure::Segmentation),
        (TRAJECTORY_PLOT, (800, 640), Figure::Trajectory),
        (ESTIMATE_PLOT, (800, 600), Figure::Estimate),
        (PHASE_EQ_PLOT, (1280, 720), Figure::PhaseEq),
    ];

    let mut names = Vec::with_capacity(figures.len());
    for (stem, size, figure) in figures {
        let name = format.file_name(stem);
        let path = dir.join(&name);
        match format {
            PlotFormat::Png => {
                let root = BitMapBackend::new(&path, size).into_drawing_area();
                figure.draw(&root, series, report).map_err(plot_error)?;
                root.present().map_err(plot_error)?;
            }
            PlotFormat::Svg => {
                let root = SVGBackend::new(&path, size).into_drawing_area();
                figure.draw(&root, series, report).map_err(plot_error)?;
                root.present().map_err(plot_error)?;
            }
        }
        debug!("Rendered {}", name);
        names.push(name);
    }
    Ok(names)
}

fn plot_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> OutputError {
    OutputError::PlotError(err.to_string())
}

#[derive(Debug, Clone, Copy)]
enum Figure {
    Segmentation,
    Trajectory,
    Estimate,
    PhaseEq,
}

impl Figure {
    fn draw<DB: DrawingBackend>(
        self,
        root: &DrawingArea<DB, Shift>,
        series: &PtSeries,
        report: &OnsetReport,
    ) -> DrawResult<DB> {
        root.fill(&WHITE)?;
        match self {
            Figure::Segmentation => draw_segmentation(root, series, report),
            Figure::Trajectory => draw_trajectory(root, series, report),
            Figure::Estimate => draw_estimate(root, series, report),
            Figure::PhaseEq => draw_phase_eq(root, series, report),
        }
    }
}

/// Min/max of the finite values, padded by 5% (or 1.0 for a flat range).
fn padded_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo > hi {
        return (0.0, 1.0);
    }
    let pad = if hi - lo > f64::EPSILON { (hi - lo) * 0.05 } else { 1.0 };
    (lo - pad, hi + pad)
}

fn draw_segmentation<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &PtSeries,
    report: &OnsetReport,
) -> DrawResult<DB> {
    let root = root.titled("Change points", ("sans-serif", 30))?;
    let panels = root.split_evenly((2, 1));
    let steps = series.len() as f64;
    let rupture = report.rupture_point as f64;

    let channels = [
        (series.pressure(), "Pressure (bar)"),
        (series.temperature(), "Temperature (°C)"),
    ];

    for (panel, (values, label)) in panels.iter().zip(channels) {
        let (lo, hi) = padded_range(values);
        let mut chart = ChartBuilder::on(panel)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(0.0..steps, lo..hi)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("steps")
            .y_desc(label)
            .draw()?;

        let mut start = 0usize;
        for (i, &end) in report.breakpoints.iter().enumerate() {
            let shade = SEGMENT_SHADES[i % SEGMENT_SHADES.len()].mix(0.2);
            chart.draw_series(std::iter::once(Rectangle::new(
                [(start as f64, lo), (end as f64, hi)],
                shade.filled(),
            )))?;
            start = end;
        }

        chart.draw_series(LineSeries::new(
            values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
            &BLUE,
        ))?;

        chart.draw_series(LineSeries::new(
            vec![(rupture, lo), (rupture, hi)],
            RED.stroke_width(2),
        ))?;

        if let Some(&value) = values.get(report.rupture_point) {
            chart.draw_series(std::iter::once(Circle::new(
                (rupture, value),
                6,
                RED.filled(),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                "Rupture Point",
                (rupture, value),
                ("sans-serif", 16).into_font().color(&RED),
            )))?;
        }
    }
    Ok(())
}

fn draw_trajectory<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &PtSeries,
    report: &OnsetReport,
) -> DrawResult<DB> {
    let (t_lo, t_hi) = padded_range(series.temperature());
    let (p_lo, p_hi) = padded_range(series.pressure());

    let mut chart = ChartBuilder::on(root)
        .caption("P-T trajectory", ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(t_lo..t_hi, p_lo..p_hi)?;

    chart
        .configure_mesh()
        .x_desc("Temperature (°C)")
        .y_desc("Pressure (bar)")
        .draw()?;

    chart.draw_series(LineSeries::new(
        series
            .temperature()
            .iter()
            .zip(series.pressure())
            .map(|(&t, &p)| (t, p)),
        &BLACK,
    ))?;

    let rupture = report.rupture;
    chart.draw_series(LineSeries::new(
        vec![(rupture.temperature, p_lo), (rupture.temperature, p_hi)],
        RED.stroke_width(1),
    ))?;
    chart.draw_series(std::iter::once(Circle::new(
        (rupture.temperature, rupture.pressure),
        6,
        RED.filled(),
    )))?;
    Ok(())
}

fn draw_estimate<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &PtSeries,
    report: &OnsetReport,
) -> DrawResult<DB> {
    let window = report.window;
    let (t_lo, t_hi) = padded_range(series.temperature_in(window));
    let (p_lo, p_hi) = padded_range(series.pressure_in(window));

    let mut chart = ChartBuilder::on(root)
        .caption("Estimated EQ point (scaled)", ("sans-serif", 26).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(t_lo..t_hi, p_lo..p_hi)?;

    chart
        .configure_mesh()
        .x_desc("Temperature (°C)")
        .y_desc("Pressure (bar)")
        .draw()?;

    chart.draw_series(
        series
            .samples_in(window)
            .map(|s| Circle::new((s.temperature, s.pressure), 1, BLACK.filled())),
    )?;

    let markers = [
        (report.onset, RED, "Onset point"),
        (report.rupture, BLUE, "Rupture point"),
    ];
    for (sample, color, label) in markers {
        chart.draw_series(LineSeries::new(
            vec![(sample.temperature, p_lo), (sample.temperature, p_hi)],
            color.mix(0.7).stroke_width(1),
        ))?;
        chart.draw_series(LineSeries::new(
            vec![(t_lo, sample.pressure), (t_hi, sample.pressure)],
            color.mix(0.7).stroke_width(1),
        ))?;
        chart.draw_series(std::iter::once(Circle::new(
            (sample.temperature, sample.pressure),
            5,
            color.filled(),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            label,
            (sample.temperature, sample.pressure),
            ("sans-serif", 16).into_font().color(&color),
        )))?;
    }
    Ok(())
}

fn draw_phase_eq<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &PtSeries,
    report: &OnsetReport,
) -> DrawResult<DB> {
    let root = root.titled("Phase EQ Diagram", ("sans-serif", 32))?;
    let panels = root.split_evenly((1, 2));
    let (overview, magnified) = (&panels[0], &panels[1]);
    let onset = report.onset;
    let trajectory = || {
        series
            .temperature()
            .iter()
            .zip(series.pressure())
            .map(|(&t, &p)| (t, p))
    };

    // 1. Overview
    let (t_lo, t_hi) = padded_range(series.temperature());
    let (p_lo, p_hi) = padded_range(series.pressure());
    let mut chart = ChartBuilder::on(overview)
        .caption("1. Overview", ("sans-serif", 22).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(t_lo..t_hi, p_lo..p_hi)?;
    chart
        .configure_mesh()
        .x_desc("Temperature (°C)")
        .y_desc("Pressure (bar)")
        .draw()?;
    chart.draw_series(LineSeries::new(trajectory(), &BLACK))?;
    chart.draw_series(LineSeries::new(
        vec![(onset.temperature, p_lo), (onset.temperature, p_hi)],
        RED.stroke_width(1),
    ))?;
    chart.draw_series(LineSeries::new(
        vec![(t_lo, onset.pressure), (t_hi, onset.pressure)],
        RED.stroke_width(1),
    ))?;
    chart.draw_series(std::iter::once(Circle::new(
        (onset.temperature, onset.pressure),
        5,
        RED.filled(),
    )))?;

    // 2. Magnified view: 0.5 °C either side, 2 bar below and 1 bar above
    let (t_lo, t_hi) = (onset.temperature - 0.5, onset.temperature + 0.5);
    let (p_lo, p_hi) = (onset.pressure - 2.0, onset.pressure + 1.0);
    let mut chart = ChartBuilder::on(magnified)
        .caption(
            "2. Magnified View",
            ("sans-serif", 22).into_font().color(&BLUE),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(t_lo..t_hi, p_lo..p_hi)?;
    chart
        .configure_mesh()
        .axis_style(&BLUE)
        .label_style(("sans-serif", 14).into_font().color(&BLUE))
        .x_desc("Temperature (°C)")
        .y_desc("Pressure (bar)")
        .draw()?;
    chart.draw_series(LineSeries::new(
        trajectory().filter(|&(t, p)| (t_lo..=t_hi).contains(&t) && (p_lo..=p_hi).contains(&p)),
        &BLUE,
    ))?;
    chart.draw_series(LineSeries::new(
        vec![(onset.temperature, p_lo), (onset.temperature, p_hi)],
        RED.stroke_width(1),
    ))?;
    chart.draw_series(LineSeries::new(
        vec![(t_lo, onset.pressure), (t_hi, onset.pressure)],
        RED.stroke_width(1),
    ))?;
    chart.draw_series(std::iter::once(Circle::new(
        (onset.temperature, onset.pressure),
        5,
        RED.filled(),
    )))?;

    let annotations = [
        ("Phase EQ".to_string(), 0.3, RED),
        (format!("{} bar", onset.pressure), 0.5, BLACK),
        (format!("{} °C", onset.temperature), 0.65, BLACK),
    ];
    for (text, offset, color) in annotations {
        chart.draw_series(std::iter::once(Text::new(
            text,
            (onset.temperature + 0.1, onset.pressure - offset),
            ("sans-serif", 16).into_font().color(&color),
        )))?;
    }
    Ok(())
}
