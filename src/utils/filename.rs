use chrono::{DateTime, Local};

/// Generate a raw snapshot filename: weather_{lowercased-city}_{YYYYMMDD_HHMMSS}.json
///
/// Second precision means two fetches for the same city within one second
/// collide; accepted as an edge case.
pub fn snapshot_filename(city: &str, timestamp: DateTime<Local>) -> String {
    format!(
        "weather_{}_{}.json",
        city.to_lowercase(),
        timestamp.format("%Y%m%d_%H%M%S")
    )
}
