use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-etl")]
#[command(about = "Personal weather ETL pipeline")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch current conditions for every configured city
    Fetch {
        #[arg(long, help = "Raw snapshot directory [default: data/raw]")]
        raw_dir: Option<PathBuf>,
    },

    /// Flatten raw snapshots into the cleaned CSV dataset
    Clean {
        #[arg(long, help = "Raw snapshot directory [default: data/raw]")]
        raw_dir: Option<PathBuf>,

        #[arg(short, long, help = "Output CSV path [default: data/clean_weather.csv]")]
        output: Option<PathBuf>,
    },

    /// Load the cleaned dataset into SQLite (full refresh)
    Store {
        #[arg(short, long, help = "Input CSV path [default: data/clean_weather.csv]")]
        input: Option<PathBuf>,

        #[arg(long, help = "SQLite database path [default: data/db/weather_data.db]")]
        db: Option<PathBuf>,
    },

    /// Fit a linear model and extrapolate temperature one hour ahead
    Predict {
        #[arg(short, long, help = "Input CSV path [default: data/clean_weather.csv]")]
        input: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Prediction output path [default: data/prediction_output.csv]"
        )]
        output: Option<PathBuf>,
    },

    /// Render temperature and humidity charts from the cleaned dataset
    Plot {
        #[arg(short, long, help = "Input CSV path [default: data/clean_weather.csv]")]
        input: Option<PathBuf>,

        #[arg(long, help = "Chart output directory [default: data/charts]")]
        chart_dir: Option<PathBuf>,
    },

    /// Run fetch, clean and store sequentially and email the outcome
    Run {
        #[arg(long, help = "Run log path [default: etl_log.txt]")]
        log_file: Option<PathBuf>,

        #[arg(long, help = "Halt the pipeline when a stage exits non-zero")]
        abort_on_failure: bool,
    },
}
