pub mod constants;
pub mod filename;
pub mod progress;

pub use filename::snapshot_filename;
pub use progress::ProgressReporter;
