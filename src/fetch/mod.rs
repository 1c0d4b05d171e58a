pub mod client;
pub mod fetcher;

pub use client::{FetchOutcome, WeatherClient};
pub use fetcher::Fetcher;
