use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::Result;
use crate::models::RawSnapshot;
use crate::utils::constants::{API_BASE_URL, CURRENT_WEATHER_PATH};

/// Outcome of one current-conditions request.
///
/// A non-200 response is data, not an error: the fetch run logs it and moves
/// on to the next city.
#[derive(Debug)]
pub enum FetchOutcome {
    /// 200 response: the parsed snapshot plus the verbatim body for archival.
    Success {
        body: String,
        snapshot: RawSnapshot,
    },
    /// Any other status: carried for the error line, nothing is written.
    Failure { status: StatusCode, body: String },
}

/// HTTP client for the weather provider's current-conditions endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Point the client at a different host, used by tests with a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Request current conditions for one city in metric units.
    ///
    /// Transport-level failures propagate; HTTP-level failures are returned
    /// as `FetchOutcome::Failure`.
    pub async fn current_weather(&self, city: &str) -> Result<FetchOutcome> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);
        debug!(city, "requesting current conditions");

        let response = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", &self.api_key), ("units", "metric")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::OK {
            let snapshot: RawSnapshot = serde_json::from_str(&body)?;
            Ok(FetchOutcome::Success { body, snapshot })
        } else {
            Ok(FetchOutcome::Failure { status, body })
        }
    }
}
