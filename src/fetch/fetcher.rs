use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::error::Result;
use crate::fetch::client::{FetchOutcome, WeatherClient};
use crate::utils::progress::ProgressReporter;
use crate::utils::snapshot_filename;

/// Batch fetcher: one snapshot file per city per run.
pub struct Fetcher {
    client: WeatherClient,
    raw_dir: PathBuf,
}

impl Fetcher {
    pub fn new(client: WeatherClient, raw_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            raw_dir: raw_dir.into(),
        }
    }

    /// Fetch every city in order and persist each 200 response verbatim.
    ///
    /// Non-200 responses print an error line and are skipped; there is no
    /// per-city error propagation. Returns the paths written.
    pub async fn run(
        &self,
        cities: &[String],
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for city in cities {
            if let Some(p) = progress {
                p.set_message(&format!("Fetching {}", city));
            }

            match self.client.current_weather(city.trim()).await? {
                FetchOutcome::Success { body, snapshot } => {
                    let temp = snapshot.main.as_ref().map(|m| m.temp);
                    let humidity = snapshot.main.as_ref().map(|m| m.humidity);
                    let summary = match (temp, humidity) {
                        (Some(t), Some(h)) => {
                            format!("Weather in {}: {:.1} °C, {:.0} % humidity", city, t, h)
                        }
                        _ => format!("Weather in {}: readings unavailable", city),
                    };

                    match progress {
                        Some(p) => p.println(&summary),
                        None => println!("{}", summary),
                    }

                    let path = self.write_snapshot(city, &body)?;
                    match progress {
                        Some(p) => p.println(&format!("Saved to {}", path.display())),
                        None => println!("Saved to {}", path.display()),
                    }
                    written.push(path);
                }
                FetchOutcome::Failure { status, body } => {
                    let line = format!("Error fetching data for {}: {} - {}", city, status, body);
                    match progress {
                        Some(p) => p.println(&line),
                        None => println!("{}", line),
                    }
                }
            }

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        Ok(written)
    }

    /// Write one verbatim response body under the raw-snapshot directory,
    /// creating it if absent. The filename carries city and local wall-clock
    /// time to second precision.
    fn write_snapshot(&self, city: &str, body: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.raw_dir)?;

        let path = self.raw_dir.join(snapshot_filename(city, Local::now()));
        fs::write(&path, body)?;
        debug!(path = %path.display(), "snapshot written");

        Ok(path)
    }

    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }
}
