/// Weather provider endpoints
pub const API_BASE_URL: &str = "https://api.openweathermap.org";
pub const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// Default artifact locations
pub const DEFAULT_RAW_DIR: &str = "data/raw";
pub const DEFAULT_CLEAN_FILE: &str = "data/clean_weather.csv";
pub const DEFAULT_DB_FILE: &str = "data/db/weather_data.db";
pub const DEFAULT_PREDICTION_FILE: &str = "data/prediction_output.csv";
pub const DEFAULT_CHART_DIR: &str = "data/charts";
pub const DEFAULT_LOG_FILE: &str = "etl_log.txt";

/// Relational store
pub const WEATHER_TABLE: &str = "weather";

/// CSV serialization
pub const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const PREDICTION_HEADER: &str = "Predicted_Temperature";

/// Forecasting defaults
pub const PREDICTION_HORIZON_SECS: i64 = 3600;
pub const TEST_FRACTION: f64 = 0.2;
pub const SPLIT_SEED: u64 = 42;

/// Notification defaults
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Cities fetched when no override is configured
pub const DEFAULT_CITIES: &[&str] = &[
    "Paris",
    "London",
    "Rome",
    "Barcelona",
    "Amsterdam",
    "Venice",
    "Prague",
    "Istanbul",
    "Vienna",
    "Athens",
    "Tokyo",
    "Beijing",
    "Dubai",
    "Mumbai",
    "Seoul",
    "Bangkok",
    "Singapore",
    "Hong Kong",
    "Jerusalem",
    "Shanghai",
    "New York City",
    "Los Angeles",
    "Toronto",
    "Mexico City",
    "Chicago",
    "Las Vegas",
    "Miami",
    "San Francisco",
    "Washington D.C.",
    "Vancouver",
    "Rio de Janeiro",
    "Buenos Aires",
    "Lima",
    "Santiago",
    "Bogotá",
    "Cairo",
    "Cape Town",
    "Marrakech",
    "Nairobi",
    "Lagos",
    "Sydney",
    "Melbourne",
];
