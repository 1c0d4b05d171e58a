pub mod notifier;
pub mod orchestrator;

pub use notifier::{EmailNotifier, Notify};
pub use orchestrator::{FailurePolicy, Orchestrator, Stage, StageCommand, StageReport};
