pub mod dataset_reader;
pub mod snapshot_reader;

pub use dataset_reader::{load_dataset, load_dataset_sorted};
pub use snapshot_reader::SnapshotReader;
