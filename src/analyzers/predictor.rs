use crate::analyzers::regression::{mse, seeded_split, LinearModel};
use crate::error::{EtlError, Result};
use crate::models::WeatherRecord;
use crate::utils::constants::{PREDICTION_HORIZON_SECS, SPLIT_SEED, TEST_FRACTION};

/// Result of one prediction run.
#[derive(Debug, Clone)]
pub struct Forecast {
    /// Mean squared error over the held-out rows. NaN when the dataset is
    /// too small to hold anything out.
    pub mse: f64,
    /// Epoch seconds of the extrapolation target, one horizon past the
    /// latest observation.
    pub target_epoch_seconds: i64,
    pub predicted_temperature: f64,
}

/// Naive linear extrapolation of temperature against absolute time.
///
/// Treating temperature as a linear function of wall-clock time is a
/// modeling simplification carried over deliberately; the MSE it reports is
/// the honest part of the contract.
pub struct TemperaturePredictor {
    test_fraction: f64,
    seed: u64,
    horizon_secs: i64,
}

impl Default for TemperaturePredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl TemperaturePredictor {
    pub fn new() -> Self {
        Self {
            test_fraction: TEST_FRACTION,
            seed: SPLIT_SEED,
            horizon_secs: PREDICTION_HORIZON_SECS,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_horizon_secs(mut self, horizon_secs: i64) -> Self {
        self.horizon_secs = horizon_secs;
        self
    }

    /// Fit on a seeded 80/20 split of the dataset and extrapolate one point
    /// past the latest observation.
    pub fn forecast(&self, records: &[WeatherRecord]) -> Result<Forecast> {
        if records.is_empty() {
            return Err(EtlError::MissingData(
                "cannot predict from an empty dataset".to_string(),
            ));
        }

        let mut sorted: Vec<&WeatherRecord> = records.iter().collect();
        sorted.sort_by_key(|r| r.datetime);

        let x: Vec<f64> = sorted.iter().map(|r| r.epoch_seconds() as f64).collect();
        let y: Vec<f64> = sorted.iter().map(|r| r.temperature_c).collect();

        let (train_idx, test_idx) = seeded_split(sorted.len(), self.test_fraction, self.seed);

        let train_x: Vec<f64> = train_idx.iter().map(|&i| x[i]).collect();
        let train_y: Vec<f64> = train_idx.iter().map(|&i| y[i]).collect();
        let model = LinearModel::fit(&train_x, &train_y)?;

        let held_out: Vec<f64> = test_idx.iter().map(|&i| y[i]).collect();
        let predicted: Vec<f64> = test_idx.iter().map(|&i| model.predict(x[i])).collect();
        let error = mse(&held_out, &predicted);

        // Extrapolate from the latest observation across the whole dataset,
        // not just the training subset.
        let latest = sorted
            .last()
            .map(|r| r.epoch_seconds())
            .unwrap_or_default();
        let target = latest + self.horizon_secs;

        Ok(Forecast {
            mse: error,
            target_epoch_seconds: target,
            predicted_temperature: model.predict(target as f64),
        })
    }
}
