pub mod record;
pub mod snapshot;

pub use record::WeatherRecord;
pub use snapshot::{ConditionEntry, MainReadings, RawSnapshot};
