pub mod chart_writer;
pub mod dataset_writer;
pub mod sqlite_writer;

pub use chart_writer::ChartWriter;
pub use dataset_writer::{replace_dataset, replace_prediction};
pub use sqlite_writer::SqliteStore;
