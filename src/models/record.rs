use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One flattened weather observation, the row format of the cleaned dataset.
///
/// Serializes to the CSV header
/// `city,datetime,temperature_C,humidity_percent,weather_main,weather_description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city: String,
    #[serde(with = "csv_datetime")]
    pub datetime: NaiveDateTime,
    #[serde(rename = "temperature_C")]
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub weather_main: String,
    pub weather_description: String,
}

impl WeatherRecord {
    /// Seconds since the Unix epoch, the numeric time feature used by the
    /// predictor.
    pub fn epoch_seconds(&self) -> i64 {
        self.datetime.and_utc().timestamp()
    }

    /// Datetime rendered the way it appears in the CSV and the SQLite table.
    pub fn datetime_string(&self) -> String {
        self.datetime
            .format(crate::utils::constants::CSV_DATETIME_FORMAT)
            .to_string()
    }
}

/// Serde adapter for the `%Y-%m-%d %H:%M:%S` column format.
mod csv_datetime {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use crate::utils::constants::CSV_DATETIME_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(CSV_DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, CSV_DATETIME_FORMAT).map_err(serde::de::Error::custom)
    }
}
