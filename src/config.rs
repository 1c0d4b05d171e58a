use std::env;
use std::path::PathBuf;

use crate::error::{EtlError, Result};
use crate::utils::constants::{
    API_BASE_URL, DEFAULT_CHART_DIR, DEFAULT_CITIES, DEFAULT_CLEAN_FILE, DEFAULT_DB_FILE,
    DEFAULT_LOG_FILE, DEFAULT_PREDICTION_FILE, DEFAULT_RAW_DIR, DEFAULT_SMTP_HOST,
};

/// Environment variable names, sourced from a local `.env` file or the
/// process environment.
pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_CITIES: &str = "WEATHER_CITIES";
pub const ENV_SMTP_HOST: &str = "SMTP_HOST";
pub const ENV_EMAIL_SENDER: &str = "EMAIL_SENDER";
pub const ENV_EMAIL_PASSWORD: &str = "EMAIL_PASSWORD";
pub const ENV_EMAIL_RECEIVER: &str = "EMAIL_RECEIVER";

/// SMTP credential set for the notifier.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub sender: String,
    pub password: String,
    pub recipient: String,
}

/// Explicit configuration passed into each stage's entry point.
///
/// Credentials are optional at construction so that stages which do not need
/// them (clean, store, predict, plot) run without a fully populated
/// environment; `require_*` accessors enforce presence where it matters.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub cities: Vec<String>,
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub raw_dir: PathBuf,
    pub clean_file: PathBuf,
    pub db_path: PathBuf,
    pub prediction_file: PathBuf,
    pub chart_dir: PathBuf,
    pub log_file: PathBuf,
    pub smtp: Option<SmtpConfig>,
}

impl PipelineConfig {
    /// Build a configuration from the process environment, falling back to
    /// the default artifact layout under `data/`.
    pub fn from_env() -> Self {
        let cities = match env::var(ENV_CITIES) {
            Ok(raw) => parse_city_list(&raw),
            Err(_) => DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
        };

        let smtp = match (
            env::var(ENV_EMAIL_SENDER),
            env::var(ENV_EMAIL_PASSWORD),
            env::var(ENV_EMAIL_RECEIVER),
        ) {
            (Ok(sender), Ok(password), Ok(recipient)) => Some(SmtpConfig {
                host: env::var(ENV_SMTP_HOST).unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string()),
                sender,
                password,
                recipient,
            }),
            _ => None,
        };

        Self {
            cities,
            api_key: env::var(ENV_API_KEY).ok(),
            api_base_url: API_BASE_URL.to_string(),
            raw_dir: PathBuf::from(DEFAULT_RAW_DIR),
            clean_file: PathBuf::from(DEFAULT_CLEAN_FILE),
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            prediction_file: PathBuf::from(DEFAULT_PREDICTION_FILE),
            chart_dir: PathBuf::from(DEFAULT_CHART_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            smtp,
        }
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| EtlError::Config(format!("{} is not set", ENV_API_KEY)))
    }

    pub fn require_smtp(&self) -> Result<&SmtpConfig> {
        self.smtp.as_ref().ok_or_else(|| {
            EtlError::Config(format!(
                "{}, {} and {} must all be set",
                ENV_EMAIL_SENDER, ENV_EMAIL_PASSWORD, ENV_EMAIL_RECEIVER
            ))
        })
    }
}

/// Parse a comma-separated city list, trimming whitespace and dropping empty
/// entries.
pub fn parse_city_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string())
        .collect()
}
