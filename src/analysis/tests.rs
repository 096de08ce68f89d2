use super::*;
use crate::changepoint::ChangepointError;
use crate::onset::OnsetError;

/// Cooling run with an abrupt temperature drop at `change` and one pressure
/// outlier at `outlier`.
fn hydrate_run(len: usize, change: usize, outlier: usize) -> PtSeries {
    let temperature = (0..len)
        .map(|i| {
            let level = if i < change { 10.0 } else { 4.0 };
            level + 0.001 * i as f64 + 0.05 * (i as f64 * 1.3).sin()
        })
        .collect();
    let mut pressure: Vec<f64> = (0..len).map(|i| 30.0 + 0.01 * i as f64).collect();
    pressure[outlier] += 5.0;
    PtSeries::new(pressure, temperature).unwrap()
}

#[test]
fn test_rupture_and_onset_located() {
    let series = hydrate_run(1000, 500, 450);
    let config = AnalysisConfig::default().step_region(100);
    let report = OnsetAnalysis::new(config).run(&series).unwrap();

    assert_eq!(*report.breakpoints.last().unwrap(), 1000);
    assert!((report.rupture_point as i64 - 500).abs() <= 10);
    assert_eq!(report.tipping_point, 450);
    assert_eq!(report.onset.index, 450);
    assert_eq!(report.onset.pressure, series.pressure()[450]);
    assert_eq!(report.rupture.index, report.rupture_point);
    assert!(report.window.contains(report.rupture_point));
    assert!(!report.window.is_clipped());
}

#[test]
fn test_candidates_are_absolute_and_ranked() {
    let series = hydrate_run(1000, 500, 450);
    let config = AnalysisConfig::default().step_region(100).top_n(5);
    let report = OnsetAnalysis::new(config).run(&series).unwrap();

    assert_eq!(report.candidates.len(), 5);
    assert_eq!(report.candidates[0].index, report.tipping_point);
    for pair in report.candidates.windows(2) {
        assert!(pair[0].distance >= pair[1].distance);
    }
    for candidate in &report.candidates {
        assert!(report.window.contains(candidate.index));
    }
}

#[test]
fn test_oversized_window_is_clipped() {
    let series = hydrate_run(1000, 500, 450);
    let config = AnalysisConfig::default().step_region(5000);
    let report = OnsetAnalysis::new(config).run(&series).unwrap();

    assert!(report.window.is_clipped());
    assert_eq!((report.window.start(), report.window.end()), (0, 1000));
    assert_eq!(report.tipping_point, 450);
}

#[test]
fn test_sentinel_position_rejected() {
    let series = hydrate_run(1000, 500, 450);
    let config = AnalysisConfig::default().n_input(1);
    let result = OnsetAnalysis::new(config).run(&series);
    assert!(matches!(
        result,
        Err(AnalysisError::Changepoint(ChangepointError::SentinelSelected(1000)))
    ));
}

#[test]
fn test_position_beyond_breakpoints_rejected() {
    let series = hydrate_run(1000, 500, 450);
    let config = AnalysisConfig::default().n_input(10);
    let result = OnsetAnalysis::new(config).run(&series);
    assert!(matches!(
        result,
        Err(AnalysisError::Changepoint(
            ChangepointError::NotEnoughChangePoints { requested: 10, .. }
        ))
    ));
}

#[test]
fn test_degenerate_chord_surfaces() {
    // Temperature returns to its starting level, so the window chord is vertical
    let temperature: Vec<f64> = (0..200)
        .map(|i| if (100..150).contains(&i) { 4.0 } else { 10.0 })
        .collect();
    let pressure: Vec<f64> = (0..200).map(|i| 30.0 + 0.01 * i as f64).collect();
    let series = PtSeries::new(pressure, temperature).unwrap();

    let config = AnalysisConfig::default()
        .penalty(10.0)
        .n_input(3)
        .step_region(100);
    let result = OnsetAnalysis::new(config).run(&series);
    assert!(matches!(
        result,
        Err(AnalysisError::Onset(OnsetError::DegenerateChord(_)))
    ));
}

#[test]
fn test_zero_step_region_leaves_no_chord() {
    let series = hydrate_run(1000, 500, 450);
    let config = AnalysisConfig::default().step_region(0);
    let result = OnsetAnalysis::new(config).run(&series);
    assert!(matches!(
        result,
        Err(AnalysisError::Onset(OnsetError::TooFewSamples(0)))
    ));
}

#[test]
fn test_runs_are_deterministic() {
    let series = hydrate_run(1000, 500, 450);
    let analysis = OnsetAnalysis::new(AnalysisConfig::default().step_region(100));
    assert_eq!(analysis.run(&series).unwrap(), analysis.run(&series).unwrap());
}
