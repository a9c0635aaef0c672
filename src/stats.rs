/// A sequence of per-index averages, updated one sample at a time
///
/// Index `i` holds the mean of every sample recorded at `i` so far. Raw samples are never
/// kept; each update is
///
/// v<sub>i</sub> ← v<sub>i</sub> + (x - v<sub>i</sub>) / (n + 1)
///
/// where `n` is the number of samples already folded into index `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LearningCurve {
    values: Vec<f64>,
}

impl LearningCurve {
    /// A curve of `len` zeros
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Fold `sample` into index `i`, given that `n` samples were already recorded there
    ///
    /// **Panics** if `i` is out of range
    pub fn record(&mut self, i: usize, n: usize, sample: f64) {
        let value = &mut self.values[i];
        *value += (sample - *value) / (n + 1) as f64;
    }

    /// Mean of the values in `range`, or `None` if it is empty
    pub fn mean(&self, range: std::ops::Range<usize>) -> Option<f64> {
        let slice = self.values.get(range)?;
        (!slice.is_empty()).then(|| slice.iter().sum::<f64>() / slice.len() as f64)
    }

    /// `(index, value)` pairs, as consumed by plotting
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }
}

/// Exponentially weighted moving average
///
/// m ← w·x + (1 - w)·m, starting from 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAverage {
    weight: f64,
    value: f64,
}

impl MovingAverage {
    /// **Panics** if `weight` is not in the interval `[0,1]`
    pub fn new(weight: f64) -> Self {
        crate::assert_interval!(weight, 0.0, 1.0);
        Self { weight, value: 0.0 }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Fold in a sample and return the new average
    pub fn update(&mut self, sample: f64) -> f64 {
        self.value = self.weight * sample + (1.0 - self.weight) * self.value;
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_tracks_per_index_mean() {
        let mut curve = LearningCurve::new(3);
        let runs = [[1.0, 2.0, 3.0], [3.0, 2.0, 0.0], [2.0, 5.0, 0.0]];
        for (n, run) in runs.iter().enumerate() {
            for (i, &x) in run.iter().enumerate() {
                curve.record(i, n, x);
            }
        }
        assert_eq!(curve.values(), [2.0, 3.0, 1.0]);
        assert_eq!(curve.mean(0..3), Some(2.0));
        assert_eq!(curve.mean(1..1), None);
        assert_eq!(curve.mean(2..9), None, "Out of range");
    }

    #[test]
    fn first_sample_replaces_zero() {
        let mut curve = LearningCurve::new(1);
        curve.record(0, 0, -0.4);
        assert_eq!(curve.values(), [-0.4]);
        assert_eq!(curve.points(), vec![(0.0, -0.4)]);
    }

    #[test]
    fn moving_average_smooths() {
        let mut ma = MovingAverage::new(0.05);
        assert_eq!(ma.update(1.0), 0.05);
        assert!((ma.update(-1.0) - (-0.05 + 0.95 * 0.05)).abs() < 1e-12);
        let mut ma = MovingAverage::new(0.05);
        for _ in 0..1000 {
            ma.update(1.0);
        }
        assert!((ma.value() - 1.0).abs() < 1e-9, "Converges to a constant input");
    }
}
