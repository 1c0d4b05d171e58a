use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::analyzers::{Forecast, TemperaturePredictor};
use crate::cli::args::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::fetch::{Fetcher, WeatherClient};
use crate::pipeline::{EmailNotifier, FailurePolicy, Orchestrator, StageReport};
use crate::readers::{load_dataset, load_dataset_sorted, SnapshotReader};
use crate::utils::progress::ProgressReporter;
use crate::writers::{replace_dataset, replace_prediction, ChartWriter, SqliteStore};

pub async fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("weather_etl=debug")),
            )
            .init();
    }

    let mut config = PipelineConfig::from_env();

    match cli.command {
        Commands::Fetch { raw_dir } => {
            if let Some(dir) = raw_dir {
                config.raw_dir = dir;
            }
            fetch(&config).await?;
        }

        Commands::Clean { raw_dir, output } => {
            if let Some(dir) = raw_dir {
                config.raw_dir = dir;
            }
            if let Some(path) = output {
                config.clean_file = path;
            }
            clean(&config)?;
        }

        Commands::Store { input, db } => {
            if let Some(path) = input {
                config.clean_file = path;
            }
            if let Some(path) = db {
                config.db_path = path;
            }
            store(&config)?;
        }

        Commands::Predict { input, output } => {
            if let Some(path) = input {
                config.clean_file = path;
            }
            if let Some(path) = output {
                config.prediction_file = path;
            }
            predict(&config)?;
        }

        Commands::Plot { input, chart_dir } => {
            if let Some(path) = input {
                config.clean_file = path;
            }
            if let Some(dir) = chart_dir {
                config.chart_dir = dir;
            }
            plot(&config)?;
        }

        Commands::Run {
            log_file,
            abort_on_failure,
        } => {
            if let Some(path) = log_file {
                config.log_file = path;
            }
            let policy = if abort_on_failure {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Continue
            };
            run_pipeline(&config, policy)?;
        }
    }

    Ok(())
}

/// Fetch stage entry point: one snapshot per city per run.
pub async fn fetch(config: &PipelineConfig) -> Result<Vec<PathBuf>> {
    println!("Fetching weather for {} cities...", config.cities.len());

    let client =
        WeatherClient::new(config.require_api_key()?)?.with_base_url(config.api_base_url.clone());
    let fetcher = Fetcher::new(client, &config.raw_dir);

    let progress = ProgressReporter::new(config.cities.len() as u64, "Fetching weather", false);
    let written = fetcher.run(&config.cities, Some(&progress)).await?;
    progress.finish_with_message(&format!("Fetched {} snapshots", written.len()));

    Ok(written)
}

/// Clean stage entry point: flatten every snapshot, then replace the CSV.
///
/// Rows are fully collected before the destructive rewrite, so a malformed
/// snapshot aborts the run with the previous dataset intact.
pub fn clean(config: &PipelineConfig) -> Result<usize> {
    let progress = ProgressReporter::new_spinner("Cleaning weather data...", false);

    let records = SnapshotReader::new(&config.raw_dir).read_all()?;
    replace_dataset(&records, &config.clean_file)?;
    progress.finish_with_message(&format!("Flattened {} snapshots", records.len()));

    println!("Cleaned data saved to {}", config.clean_file.display());
    Ok(records.len())
}

/// Store stage entry point: full-refresh load into SQLite.
pub fn store(config: &PipelineConfig) -> Result<usize> {
    let records = load_dataset(&config.clean_file)?;
    let rows = SqliteStore::new(&config.db_path).load_full_refresh(&records)?;

    println!(
        "Cleaned data successfully stored in {} ({} rows)",
        config.db_path.display(),
        rows
    );
    Ok(rows)
}

/// Predict stage entry point.
pub fn predict(config: &PipelineConfig) -> Result<Forecast> {
    let records = load_dataset_sorted(&config.clean_file)?;
    let forecast = TemperaturePredictor::new().forecast(&records)?;

    println!("Mean Squared Error: {:.2}", forecast.mse);
    println!(
        "Predicted temperature 1 hour later: {:.2} °C",
        forecast.predicted_temperature
    );

    replace_prediction(forecast.predicted_temperature, &config.prediction_file)?;
    println!("Prediction saved to {}", config.prediction_file.display());

    Ok(forecast)
}

/// Plot stage entry point.
pub fn plot(config: &PipelineConfig) -> Result<(PathBuf, PathBuf)> {
    let records = load_dataset_sorted(&config.clean_file)?;
    let (temperature, humidity) = ChartWriter::new(&config.chart_dir).render_all(&records)?;

    println!("Temperature chart saved to {}", temperature.display());
    println!("Humidity chart saved to {}", humidity.display());

    Ok((temperature, humidity))
}

/// Orchestrated run: fetch -> clean -> store plus one outcome email.
pub fn run_pipeline(
    config: &PipelineConfig,
    policy: FailurePolicy,
) -> Result<Vec<StageReport>> {
    let notifier = EmailNotifier::new(config.require_smtp()?.clone());
    let orchestrator = Orchestrator::for_current_exe(&config.log_file)?.with_policy(policy);

    let reports = orchestrator.run(&notifier)?;

    for report in &reports {
        let outcome = match (report.succeeded(), report.status.code()) {
            (true, _) => "ok".to_string(),
            (false, Some(code)) => format!("exit code {}", code),
            (false, None) => "terminated by signal".to_string(),
        };
        println!("{}: {}", report.stage, outcome);
    }
    println!("Run log appended to {}", config.log_file.display());

    Ok(reports)
}
