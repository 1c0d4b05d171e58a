use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::Result;
use crate::models::WeatherRecord;
use crate::utils::constants::WEATHER_TABLE;

/// Full-refresh loader for the `weather` table.
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Drop and recreate the table, then bulk-insert every row inside a
    /// single transaction. After this returns, table contents exactly equal
    /// the given rows; nothing from a prior load survives.
    pub fn load_full_refresh(&self, records: &[WeatherRecord]) -> Result<usize> {
        if let Some(parent) = self.db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut conn = Connection::open(&self.db_path)?;
        let tx = conn.transaction()?;

        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table};
             CREATE TABLE {table} (
                 city TEXT,
                 datetime TEXT,
                 temperature_C REAL,
                 humidity_percent REAL,
                 weather_main TEXT,
                 weather_description TEXT
             );",
            table = WEATHER_TABLE
        ))?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} (city, datetime, temperature_C, humidity_percent, \
                 weather_main, weather_description) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                WEATHER_TABLE
            ))?;

            for record in records {
                stmt.execute(params![
                    record.city,
                    record.datetime_string(),
                    record.temperature_c,
                    record.humidity_percent,
                    record.weather_main,
                    record.weather_description,
                ])?;
            }
        }

        tx.commit()?;
        debug!(rows = records.len(), "weather table refreshed");

        Ok(records.len())
    }

    /// Row count of the weather table, used by tests and the run summary.
    pub fn count_rows(&self) -> Result<i64> {
        let conn = Connection::open(&self.db_path)?;
        let count = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", WEATHER_TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn record(city: &str, temp: f64) -> WeatherRecord {
        WeatherRecord {
            city: city.to_string(),
            datetime: NaiveDate::from_ymd_opt(2023, 11, 14)
                .unwrap()
                .and_hms_opt(22, 13, 20)
                .unwrap(),
            temperature_c: temp,
            humidity_percent: 80.0,
            weather_main: "Clouds".to_string(),
            weather_description: "overcast".to_string(),
        }
    }

    #[test]
    fn test_load_creates_database_and_rows() {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::new(dir.path().join("db").join("weather_data.db"));

        let loaded = store
            .load_full_refresh(&[record("Paris", 12.5), record("London", 9.0)])
            .unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(store.count_rows().unwrap(), 2);

        let conn = Connection::open(store.path()).unwrap();
        let (city, datetime, temp): (String, String, f64) = conn
            .query_row(
                "SELECT city, datetime, temperature_C FROM weather WHERE city = 'Paris'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!(city, "Paris");
        assert_eq!(datetime, "2023-11-14 22:13:20");
        assert_eq!(temp, 12.5);
    }

    #[test]
    fn test_reload_is_full_refresh() {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::new(dir.path().join("weather_data.db"));

        store
            .load_full_refresh(&[record("Paris", 12.5), record("London", 9.0)])
            .unwrap();
        store.load_full_refresh(&[record("Rome", 18.0)]).unwrap();

        assert_eq!(store.count_rows().unwrap(), 1);

        let conn = Connection::open(store.path()).unwrap();
        let city: String = conn
            .query_row("SELECT city FROM weather", [], |row| row.get(0))
            .unwrap();
        assert_eq!(city, "Rome");
    }

    #[test]
    fn test_load_empty_dataset_leaves_empty_table() {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::new(dir.path().join("weather_data.db"));

        store.load_full_refresh(&[record("Paris", 12.5)]).unwrap();
        store.load_full_refresh(&[]).unwrap();

        assert_eq!(store.count_rows().unwrap(), 0);
    }
}
