use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::WeatherRecord;
use crate::utils::constants::PREDICTION_HEADER;

/// Replace the cleaned dataset file with the given rows.
///
/// The dataset is a single-slot artifact: every write fully supersedes the
/// previous contents. Parent directories are created as needed.
pub fn replace_dataset(records: &[WeatherRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Replace the one-row prediction file with a single temperature value,
/// formatted to two decimal places.
pub fn replace_prediction(value: f64, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, format!("{}\n{:.2}\n", PREDICTION_HEADER, value))?;
    Ok(())
}
