use std::fs;
use std::path::PathBuf;

use chrono::{Duration, NaiveDateTime};
use plotters::coord::types::RangedDateTime;
use plotters::prelude::*;
use plotters::style::{FontTransform, IntoFont, TextStyle};

use crate::error::{EtlError, Result};
use crate::models::WeatherRecord;

const CHART_SIZE: (u32, u32) = (1000, 500);

/// Renders the cleaned dataset as time-series PNG charts.
pub struct ChartWriter {
    chart_dir: PathBuf,
}

impl ChartWriter {
    pub fn new(chart_dir: impl Into<PathBuf>) -> Self {
        Self {
            chart_dir: chart_dir.into(),
        }
    }

    /// Render the temperature and humidity charts, returning both paths.
    pub fn render_all(&self, records: &[WeatherRecord]) -> Result<(PathBuf, PathBuf)> {
        if records.is_empty() {
            return Err(EtlError::MissingData(
                "cannot plot an empty dataset".to_string(),
            ));
        }

        fs::create_dir_all(&self.chart_dir)?;

        let temperature = self.render_series(
            records,
            |r| r.temperature_c,
            "Temperature Over Time",
            "Temperature (°C)",
            "temperature_over_time.png",
            RED,
        )?;
        let humidity = self.render_series(
            records,
            |r| r.humidity_percent,
            "Humidity Over Time",
            "Humidity (%)",
            "humidity_over_time.png",
            BLUE,
        )?;

        Ok((temperature, humidity))
    }

    fn render_series(
        &self,
        records: &[WeatherRecord],
        value: fn(&WeatherRecord) -> f64,
        title: &str,
        y_label: &str,
        filename: &str,
        color: RGBColor,
    ) -> Result<PathBuf> {
        let path = self.chart_dir.join(filename);

        let points: Vec<(NaiveDateTime, f64)> =
            records.iter().map(|r| (r.datetime, value(r))).collect();

        let (t_min, t_max) = time_bounds(&points);
        let (y_min, y_max) = value_bounds(&points);

        // The drawing area borrows `path` for the backend's lifetime, so all
        // rendering happens in an inner scope before the path is returned.
        {
            let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
            root.fill(&WHITE).map_err(chart_err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 28))
                .margin(10)
                .x_label_area_size(80)
                .y_label_area_size(60)
                .build_cartesian_2d(RangedDateTime::from(t_min..t_max), y_min..y_max)
                .map_err(chart_err)?;

            chart
                .configure_mesh()
                .x_labels(8)
                .x_label_formatter(&|dt: &NaiveDateTime| dt.format("%m-%d %H:%M").to_string())
                .x_label_style(
                    TextStyle::from(("sans-serif", 12).into_font())
                        .transform(FontTransform::Rotate90),
                )
                .x_desc("Date/Time")
                .y_desc(y_label)
                .draw()
                .map_err(chart_err)?;

            chart
                .draw_series(LineSeries::new(points.iter().cloned(), &color))
                .map_err(chart_err)?;
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|(t, v)| Circle::new((*t, *v), 3, color.filled())),
                )
                .map_err(chart_err)?;

            root.present().map_err(chart_err)?;
        }

        Ok(path)
    }
}

fn chart_err<E: std::fmt::Display>(err: E) -> EtlError {
    EtlError::Chart(err.to_string())
}

/// Time axis bounds, widened for single-point datasets so the range is never
/// empty.
fn time_bounds(points: &[(NaiveDateTime, f64)]) -> (NaiveDateTime, NaiveDateTime) {
    let min = points.iter().map(|(t, _)| *t).min().unwrap_or_default();
    let max = points.iter().map(|(t, _)| *t).max().unwrap_or_default();

    if min == max {
        (min - Duration::hours(1), max + Duration::hours(1))
    } else {
        (min, max)
    }
}

fn value_bounds(points: &[(NaiveDateTime, f64)]) -> (f64, f64) {
    let min = points.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max = points
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);

    let pad = ((max - min) * 0.05).max(1.0);
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(hour: u32, temp: f64) -> WeatherRecord {
        WeatherRecord {
            city: "Paris".to_string(),
            datetime: NaiveDate::from_ymd_opt(2023, 11, 14)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            temperature_c: temp,
            humidity_percent: 80.0,
            weather_main: "Clouds".to_string(),
            weather_description: "overcast".to_string(),
        }
    }

    #[test]
    fn test_render_all_writes_both_charts() {
        let dir = TempDir::new().unwrap();
        let writer = ChartWriter::new(dir.path().join("charts"));

        let (temperature, humidity) = writer
            .render_all(&[record(10, 12.5), record(11, 13.0), record(12, 14.0)])
            .unwrap();

        assert!(temperature.exists());
        assert!(humidity.exists());
        assert!(temperature.metadata().unwrap().len() > 0);
        // Returned paths point into the configured chart directory.
        assert!(temperature.starts_with(dir.path().join("charts")));
        assert!(humidity.starts_with(dir.path().join("charts")));
    }

    #[test]
    fn test_render_all_rejects_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let writer = ChartWriter::new(dir.path());

        assert!(matches!(
            writer.render_all(&[]),
            Err(EtlError::MissingData(_))
        ));
    }

    #[test]
    fn test_render_all_handles_single_point() {
        let dir = TempDir::new().unwrap();
        let writer = ChartWriter::new(dir.path());

        assert!(writer.render_all(&[record(10, 12.5)]).is_ok());
    }
}
