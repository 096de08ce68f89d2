use super::OnsetError;

/// Straight line through the first and last samples of a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chord {
    /// Slope `dy/dx`
    pub slope: f64,
    /// Value of the line at `x = 0`
    pub intercept: f64,
}

impl Chord {
    /// Chord joining `(x[0], y[0])` and `(x[last], y[last])`.
    pub fn through_endpoints(x: &[f64], y: &[f64]) -> Result<Self, OnsetError> {
        if x.len() != y.len() {
            return Err(OnsetError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(OnsetError::TooFewSamples(x.len()));
        }

        let (x0, y0) = (x[0], y[0]);
        let (x1, y1) = (x[x.len() - 1], y[y.len() - 1]);
        if x1 == x0 {
            return Err(OnsetError::DegenerateChord(x0));
        }

        let slope = (y1 - y0) / (x1 - x0);
        Ok(Self {
            slope,
            intercept: y0 - slope * x0,
        })
    }

    /// Value of the line at `x`.
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Perpendicular distance from `(x, y)` to the line.
    pub fn distance(&self, x: f64, y: f64) -> f64 {
        (y - self.at(x)).abs() / (self.slope * self.slope + 1.0).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_through_endpoints() {
        let chord = Chord::through_endpoints(&[0.0, 1.0, 2.0], &[1.0, 5.0, 5.0]).unwrap();
        assert!((chord.slope - 2.0).abs() < 1e-12);
        assert!((chord.intercept - 1.0).abs() < 1e-12);
        assert!((chord.at(1.5) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_perpendicular_distance() {
        // y = x; the point (0, 2) lies sqrt(2) away
        let chord = Chord::through_endpoints(&[0.0, 4.0], &[0.0, 4.0]).unwrap();
        assert!((chord.distance(0.0, 2.0) - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!(chord.distance(3.0, 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_vertical_chord_is_degenerate() {
        let result = Chord::through_endpoints(&[2.0, 3.0, 2.0], &[0.0, 1.0, 5.0]);
        assert!(matches!(result, Err(OnsetError::DegenerateChord(x)) if x == 2.0));
    }

    #[test]
    fn test_single_sample_rejected() {
        assert!(matches!(
            Chord::through_endpoints(&[1.0], &[1.0]),
            Err(OnsetError::TooFewSamples(1))
        ));
    }
}
