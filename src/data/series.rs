use std::ops::Range;

use super::DataError;

/// One (temperature, pressure) reading at a sequence index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Sequence index (implicit time step)
    pub index: usize,
    /// Temperature in °C
    pub temperature: f64,
    /// Pressure in bar
    pub pressure: f64,
}

/// Immutable, index-aligned pressure and temperature sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct PtSeries {
    pressure: Vec<f64>,
    temperature: Vec<f64>,
    pressure_label: String,
    temperature_label: String,
}

impl PtSeries {
    /// Build a series from parallel sequences.
    pub fn new(pressure: Vec<f64>, temperature: Vec<f64>) -> Result<Self, DataError> {
        if pressure.len() != temperature.len() {
            return Err(DataError::LengthMismatch {
                pressure: pressure.len(),
                temperature: temperature.len(),
            });
        }
        if pressure.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(Self {
            pressure,
            temperature,
            pressure_label: "pressure".to_string(),
            temperature_label: "temperature".to_string(),
        })
    }

    /// Attach the source column names.
    pub fn with_labels(mut self, pressure: impl Into<String>, temperature: impl Into<String>) -> Self {
        self.pressure_label = pressure.into();
        self.temperature_label = temperature.into();
        self
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    /// True when the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }

    /// Pressure readings in bar.
    pub fn pressure(&self) -> &[f64] {
        &self.pressure
    }

    /// Temperature readings in °C.
    pub fn temperature(&self) -> &[f64] {
        &self.temperature
    }

    /// Source column name of the pressure channel.
    pub fn pressure_label(&self) -> &str {
        &self.pressure_label
    }

    /// Source column name of the temperature channel.
    pub fn temperature_label(&self) -> &str {
        &self.temperature_label
    }

    /// Reading at `index`, if in range.
    pub fn sample(&self, index: usize) -> Option<Sample> {
        Some(Sample {
            index,
            temperature: *self.temperature.get(index)?,
            pressure: *self.pressure.get(index)?,
        })
    }

    /// Reading at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; use [`PtSeries::sample`] otherwise.
    pub fn sample_at(&self, index: usize) -> Sample {
        Sample {
            index,
            temperature: self.temperature[index],
            pressure: self.pressure[index],
        }
    }

    /// Window of `half_width` samples either side of `center`, clipped to the series.
    pub fn window(&self, center: usize, half_width: usize) -> Window {
        Window::around(center, half_width, self.len())
    }

    /// Pressure readings inside `window`.
    pub fn pressure_in(&self, window: Window) -> &[f64] {
        &self.pressure[self.bounds(window)]
    }

    /// Temperature readings inside `window`.
    pub fn temperature_in(&self, window: Window) -> &[f64] {
        &self.temperature[self.bounds(window)]
    }

    /// Samples inside `window`, carrying absolute indices.
    pub fn samples_in(&self, window: Window) -> impl Iterator<Item = Sample> + '_ {
        self.bounds(window).map(move |index| self.sample_at(index))
    }

    // a window built for a longer series is cut to this one
    fn bounds(&self, window: Window) -> Range<usize> {
        let end = window.end.min(self.len());
        window.start.min(end)..end
    }
}

/// Half-open range `[start, end)` of absolute sample indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: usize,
    end: usize,
    clipped: bool,
}

impl Window {
    /// `[center - half_width, center + half_width)` clipped to `[0, len)`.
    pub fn around(center: usize, half_width: usize, len: usize) -> Self {
        let wanted_start = center as i128 - half_width as i128;
        let wanted_end = center as i128 + half_width as i128;
        let start = wanted_start.clamp(0, len as i128) as usize;
        let end = (wanted_end.clamp(0, len as i128) as usize).max(start);
        Self {
            start,
            end,
            clipped: wanted_start < 0 || wanted_end > len as i128,
        }
    }

    /// First index in the window.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last index in the window.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Whether either side was cut short by the series bounds.
    pub fn is_clipped(&self) -> bool {
        self.clipped
    }

    /// Number of samples in the window.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether the absolute `index` falls inside the window.
    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }

    /// Absolute index of window position `local`.
    pub fn absolute(&self, local: usize) -> usize {
        self.start + local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> PtSeries {
        let pressure = (0..len).map(|i| 30.0 + i as f64).collect();
        let temperature = (0..len).map(|i| 20.0 - i as f64 * 0.1).collect();
        PtSeries::new(pressure, temperature).unwrap()
    }

    #[test]
    fn test_series_rejects_mismatch_and_empty() {
        assert!(matches!(
            PtSeries::new(vec![1.0], vec![]),
            Err(DataError::LengthMismatch { .. })
        ));
        assert!(matches!(PtSeries::new(vec![], vec![]), Err(DataError::Empty)));
    }

    #[test]
    fn test_sample_lookup() {
        let series = ramp(10);
        let sample = series.sample(3).unwrap();
        assert_eq!(sample.index, 3);
        assert_eq!(sample.pressure, 33.0);
        assert!(series.sample(10).is_none());
    }

    #[test]
    fn test_window_inside_bounds() {
        let window = Window::around(500, 100, 1000);
        assert_eq!((window.start(), window.end()), (400, 600));
        assert_eq!(window.len(), 200);
        assert!(!window.is_clipped());
        assert!(window.contains(400));
        assert!(!window.contains(600));
        assert_eq!(window.absolute(50), 450);
    }

    #[test]
    fn test_window_clipped_at_both_ends() {
        let window = Window::around(30, 1000, 120);
        assert_eq!((window.start(), window.end()), (0, 120));
        assert!(window.is_clipped());
    }

    #[test]
    fn test_window_clipped_on_one_side() {
        let window = Window::around(90, 20, 100);
        assert_eq!((window.start(), window.end()), (70, 100));
        assert!(window.is_clipped());
    }

    #[test]
    fn test_window_slices_align() {
        let series = ramp(50);
        let window = series.window(10, 3);
        assert_eq!(series.pressure_in(window), &[37.0, 38.0, 39.0, 40.0, 41.0, 42.0]);
        assert_eq!(series.temperature_in(window).len(), 6);
        let indices: Vec<usize> = series.samples_in(window).map(|s| s.index).collect();
        assert_eq!(indices, (7..13).collect::<Vec<_>>());
    }

    #[test]
    fn test_window_from_longer_series_is_cut() {
        let series = ramp(20);
        let window = Window::around(15, 10, 100);
        assert_eq!((window.start(), window.end()), (5, 25));

        assert_eq!(series.pressure_in(window).len(), 15);
        assert_eq!(series.temperature_in(window).len(), 15);
        let indices: Vec<usize> = series.samples_in(window).map(|s| s.index).collect();
        assert_eq!(indices, (5..20).collect::<Vec<_>>());

        let beyond = Window::around(60, 5, 100);
        assert!(series.pressure_in(beyond).is_empty());
        assert_eq!(series.samples_in(beyond).count(), 0);
    }

    #[test]
    fn test_zero_half_width_is_empty() {
        let window = Window::around(10, 0, 50);
        assert!(window.is_empty());
    }
}
