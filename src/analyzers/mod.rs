pub mod predictor;
pub mod regression;

pub use predictor::{Forecast, TemperaturePredictor};
pub use regression::{mse, seeded_split, LinearModel};
