use std::path::Path;

use crate::error::Result;
use crate::models::WeatherRecord;

/// Load the cleaned dataset from its CSV file.
pub fn load_dataset(path: &Path) -> Result<Vec<WeatherRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in reader.deserialize() {
        records.push(row?);
    }

    Ok(records)
}

/// Load the cleaned dataset sorted ascending by observation time.
pub fn load_dataset_sorted(path: &Path) -> Result<Vec<WeatherRecord>> {
    let mut records = load_dataset(path)?;
    records.sort_by_key(|r| r.datetime);
    Ok(records)
}
