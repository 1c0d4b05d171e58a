use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{EtlError, Result};

/// Ordinary least-squares fit of y on a single feature x.
///
/// Fits y = intercept + slope * x in closed form. Sums are taken over
/// deviations from the feature mean to stay well conditioned when x is
/// seconds since the epoch.
#[derive(Debug, Clone)]
pub struct LinearModel {
    intercept: f64,
    slope: f64,
}

impl LinearModel {
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.is_empty() || x.len() != y.len() {
            return Err(EtlError::InvalidFormat(format!(
                "cannot fit regression on {} feature and {} target values",
                x.len(),
                y.len()
            )));
        }

        let n = x.len() as f64;
        let x_mean = x.iter().sum::<f64>() / n;
        let y_mean = y.iter().sum::<f64>() / n;

        let mut ss_xx = 0.0;
        let mut ss_xy = 0.0;
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            let dx = xi - x_mean;
            ss_xx += dx * dx;
            ss_xy += dx * (yi - y_mean);
        }

        // A constant feature has no slope to estimate; fall back to the mean.
        let slope = if ss_xx == 0.0 { 0.0 } else { ss_xy / ss_xx };
        let intercept = y_mean - slope * x_mean;

        Ok(Self { intercept, slope })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Mean Squared Error between actual and predicted values.
///
/// Returns NaN for empty or mismatched inputs.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    sum / actual.len() as f64
}

/// Reproducible pseudo-random train/held-out index partition.
///
/// The split is not time-ordered: held-out points may precede training
/// points temporally. The held-out size is ceil(n * test_fraction); with
/// very small inputs the partition degrades silently.
pub fn seeded_split(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = ((n as f64) * test_fraction).ceil() as usize;
    let test = indices.split_off(n.saturating_sub(test_len.min(n)));

    (indices, test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fit_recovers_exact_line() {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|xi| 2.0 * xi + 1.0).collect();

        let model = LinearModel::fit(&x, &y).unwrap();

        assert!((model.slope() - 2.0).abs() < 1e-9);
        assert!((model.intercept() - 1.0).abs() < 1e-9);
        assert!((model.predict(20.0) - 41.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_constant_feature_falls_back_to_mean() {
        let model = LinearModel::fit(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]).unwrap();

        assert_eq!(model.slope(), 0.0);
        assert!((model.predict(5.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_rejects_empty_or_mismatched_input() {
        assert!(LinearModel::fit(&[], &[]).is_err());
        assert!(LinearModel::fit(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_mse() {
        assert_eq!(mse(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
        assert!((mse(&[1.0, 2.0], &[2.0, 4.0]) - 2.5).abs() < 1e-9);
        assert!(mse(&[], &[]).is_nan());
        assert!(mse(&[1.0], &[1.0, 2.0]).is_nan());
    }

    #[test]
    fn test_seeded_split_is_reproducible() {
        let (train_a, test_a) = seeded_split(10, 0.2, 42);
        let (train_b, test_b) = seeded_split(10, 0.2, 42);

        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);
        assert_eq!(train_a.len(), 8);
        assert_eq!(test_a.len(), 2);
    }

    #[test]
    fn test_seeded_split_partitions_all_indices() {
        let (mut train, mut test) = seeded_split(13, 0.2, 7);
        train.append(&mut test);
        train.sort_unstable();

        assert_eq!(train, (0..13).collect::<Vec<_>>());
    }

    #[test]
    fn test_seeded_split_small_inputs_degrade_silently() {
        let (train, test) = seeded_split(1, 0.2, 42);
        assert!(train.is_empty());
        assert_eq!(test.len(), 1);

        let (train, test) = seeded_split(0, 0.2, 42);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }
}
