use std::io::Write;

use crate::analysis::OnsetReport;
use crate::data::PtSeries;

use super::OutputError;

/// File name of the extracted-window table.
pub const PHASE_EQ_DATA: &str = "Phase EQ Data.csv";
/// File name of the tipping/rupture point table.
pub const TIPPING_POINTS: &str = "Tipping points.csv";

/// Write the extracted window as `pressure,temperature` rows.
pub fn write_phase_eq_data<W: Write>(
    writer: W,
    series: &PtSeries,
    report: &OnsetReport,
) -> Result<(), OutputError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["pressure", "temperature"])?;
    for sample in series.samples_in(report.window) {
        csv_writer.write_record([sample.pressure.to_string(), sample.temperature.to_string()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the single `Tipping point,Rupture point` row.
pub fn write_tipping_points<W: Write>(writer: W, report: &OnsetReport) -> Result<(), OutputError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Tipping point", "Rupture point"])?;
    csv_writer.write_record([report.tipping_point.to_string(), report.rupture_point.to_string()])?;
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisConfig, OnsetAnalysis};

    fn run() -> (PtSeries, OnsetReport) {
        let temperature: Vec<f64> = (0..120)
            .map(|i| if i < 60 { 12.0 - 0.01 * i as f64 } else { 6.0 - 0.01 * i as f64 })
            .collect();
        let mut pressure: Vec<f64> = (0..120).map(|i| 40.0 - 0.05 * i as f64).collect();
        pressure[55] += 2.0;
        let series = PtSeries::new(pressure, temperature).unwrap();
        let config = AnalysisConfig::default().penalty(20.0).jump(1).step_region(10);
        let report = OnsetAnalysis::new(config).run(&series).unwrap();
        (series, report)
    }

    #[test]
    fn test_phase_eq_data_covers_window() {
        let (series, report) = run();
        let mut buffer = Vec::new();
        write_phase_eq_data(&mut buffer, &series, &report).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "pressure,temperature");
        assert_eq!(lines.len(), report.window.len() + 1);

        let first = series.sample(report.window.start()).unwrap();
        assert_eq!(lines[1], format!("{},{}", first.pressure, first.temperature));
    }

    #[test]
    fn test_tipping_points_row() {
        let (_, report) = run();
        let mut buffer = Vec::new();
        write_tipping_points(&mut buffer, &report).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            format!(
                "Tipping point,Rupture point\n{},{}\n",
                report.tipping_point, report.rupture_point
            )
        );
    }
}
