use serde::{Deserialize, Serialize};

use crate::error::{EtlError, Result};
use crate::models::WeatherRecord;

/// One raw API response captured at a point in time for one location.
///
/// Fields the pipeline does not consume are ignored at parse time. The fields
/// it does consume are optional here so that absence surfaces as a
/// `MissingData` error during flattening rather than a generic parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub name: Option<String>,
    pub dt: Option<i64>,
    pub main: Option<MainReadings>,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
}

/// The provider's nested temperature/humidity block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub humidity: f64,
}

/// One entry of the provider's weather-condition list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionEntry {
    pub main: String,
    pub description: String,
}

impl RawSnapshot {
    /// Flatten this snapshot into exactly one tabular record.
    ///
    /// Pure function of the six source fields; fails if any of name,
    /// timestamp, readings block or first condition entry is absent.
    pub fn flatten(&self) -> Result<WeatherRecord> {
        let city = self
            .name
            .clone()
            .ok_or_else(|| EtlError::MissingData("snapshot has no 'name' field".to_string()))?;

        let dt = self
            .dt
            .ok_or_else(|| EtlError::MissingData("snapshot has no 'dt' timestamp".to_string()))?;

        let datetime = chrono::DateTime::from_timestamp(dt, 0)
            .ok_or_else(|| EtlError::InvalidFormat(format!("Unix timestamp out of range: {}", dt)))?
            .naive_utc();

        let readings = self
            .main
            .as_ref()
            .ok_or_else(|| EtlError::MissingData("snapshot has no 'main' block".to_string()))?;

        let condition = self.weather.first().ok_or_else(|| {
            EtlError::MissingData("snapshot has an empty 'weather' list".to_string())
        })?;

        Ok(WeatherRecord {
            city,
            datetime,
            temperature_c: readings.temp,
            humidity_percent: readings.humidity,
            weather_main: condition.main.clone(),
            weather_description: condition.description.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> RawSnapshot {
        serde_json::from_str(
            r#"{"name":"Paris","dt":1700000000,
                "main":{"temp":12.5,"humidity":80},
                "weather":[{"main":"Clouds","description":"overcast"}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_flatten_valid_snapshot() {
        let record = sample().flatten().unwrap();

        assert_eq!(record.city, "Paris");
        assert_eq!(
            record.datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2023-11-14 22:13:20"
        );
        assert_eq!(record.temperature_c, 12.5);
        assert_eq!(record.humidity_percent, 80.0);
        assert_eq!(record.weather_main, "Clouds");
        assert_eq!(record.weather_description, "overcast");
    }

    #[test]
    fn test_flatten_ignores_extra_provider_fields() {
        let snapshot: RawSnapshot = serde_json::from_str(
            r#"{"name":"Paris","dt":1700000000,"cod":200,"visibility":10000,
                "main":{"temp":12.5,"humidity":80,"pressure":1013},
                "weather":[{"id":804,"main":"Clouds","description":"overcast"}]}"#,
        )
        .unwrap();

        assert!(snapshot.flatten().is_ok());
    }

    #[test]
    fn test_flatten_missing_fields() {
        let mut snapshot = sample();
        snapshot.name = None;
        assert!(matches!(
            snapshot.flatten(),
            Err(EtlError::MissingData(msg)) if msg.contains("name")
        ));

        let mut snapshot = sample();
        snapshot.dt = None;
        assert!(matches!(
            snapshot.flatten(),
            Err(EtlError::MissingData(msg)) if msg.contains("dt")
        ));

        let mut snapshot = sample();
        snapshot.main = None;
        assert!(matches!(
            snapshot.flatten(),
            Err(EtlError::MissingData(msg)) if msg.contains("main")
        ));

        let mut snapshot = sample();
        snapshot.weather.clear();
        assert!(matches!(
            snapshot.flatten(),
            Err(EtlError::MissingData(msg)) if msg.contains("weather")
        ));
    }
}
