use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use chrono::Local;

use crate::error::{EtlError, Result};
use crate::pipeline::notifier::Notify;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Clean,
    Store,
}

impl Stage {
    pub fn subcommand(&self) -> &'static str {
        match self {
            Stage::Fetch => "fetch",
            Stage::Clean => "clean",
            Stage::Store => "store",
        }
    }

    fn log_line(&self) -> &'static str {
        match self {
            Stage::Fetch => "Fetching weather data...",
            Stage::Clean => "Cleaning weather data...",
            Stage::Store => "Storing data...",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

/// The subprocess to launch for one stage.
#[derive(Debug, Clone)]
pub struct StageCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Explicit per-stage result; the orchestrator records it and the configured
/// policy decides what a failure means.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: Stage,
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl StageReport {
    pub fn succeeded(&self) -> bool {
        self.status.success()
    }
}

/// What a non-zero stage exit does to the run.
///
/// `Continue` is the default and preserves the long-standing behavior where
/// a stage's internal failure is only visible in the captured log output;
/// only orchestrator-level errors (spawn or log-write failures) abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    Continue,
    Abort,
}

/// Runs fetch -> clean -> store as sequential subprocesses with an
/// append-only run log, then sends exactly one outcome notification.
pub struct Orchestrator {
    log_file: PathBuf,
    stages: Vec<(Stage, StageCommand)>,
    policy: FailurePolicy,
}

impl Orchestrator {
    pub fn new(log_file: impl Into<PathBuf>, stages: Vec<(Stage, StageCommand)>) -> Self {
        Self {
            log_file: log_file.into(),
            stages,
            policy: FailurePolicy::default(),
        }
    }

    /// Standard pipeline: re-invoke the current executable with each stage's
    /// subcommand.
    pub fn for_current_exe(log_file: impl Into<PathBuf>) -> Result<Self> {
        let exe = std::env::current_exe()?;
        let stages = [Stage::Fetch, Stage::Clean, Stage::Store]
            .into_iter()
            .map(|stage| {
                (
                    stage,
                    StageCommand {
                        program: exe.clone(),
                        args: vec![stage.subcommand().to_string()],
                    },
                )
            })
            .collect();

        Ok(Self::new(log_file, stages))
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run all stages, then notify once with the outcome.
    ///
    /// On failure the notification is sent before the error is returned. A
    /// notifier failure on that path propagates instead, shadowing the
    /// original error; known weakness, deliberately preserved.
    pub fn run(&self, notifier: &dyn Notify) -> Result<Vec<StageReport>> {
        match self.run_stages() {
            Ok(reports) => {
                notifier.notify("ETL Success", "Your ETL pipeline ran successfully.")?;
                Ok(reports)
            }
            Err(err) => {
                notifier.notify("ETL Failed", &format!("ETL failed with error: {}", err))?;
                Err(err)
            }
        }
    }

    fn run_stages(&self) -> Result<Vec<StageReport>> {
        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)?;

        writeln!(
            log,
            "\n----- ETL RUN at {} -----",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;

        let mut reports = Vec::new();

        for (stage, command) in &self.stages {
            writeln!(log, "{}", stage.log_line())?;

            let output = Command::new(&command.program)
                .args(&command.args)
                .output()
                .map_err(|e| EtlError::Stage {
                    stage: stage.to_string(),
                    message: e.to_string(),
                })?;

            log.write_all(&output.stdout)?;
            log.write_all(&output.stderr)?;

            let report = StageReport {
                stage: *stage,
                status: output.status,
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            };

            let failed = !report.succeeded();
            reports.push(report);

            if failed && self.policy == FailurePolicy::Abort {
                writeln!(log, "ETL aborted at {} stage.", stage)?;
                return Err(EtlError::Stage {
                    stage: stage.to_string(),
                    message: format!(
                        "exited with {}",
                        reports
                            .last()
                            .and_then(|r| r.status.code())
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| "signal".to_string())
                    ),
                });
            }
        }

        writeln!(log, "ETL completed.")?;
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Notify for RecordingNotifier {
        fn notify(&self, subject: &str, body: &str) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn shell_stage(stage: Stage, script: &str) -> (Stage, StageCommand) {
        (
            stage,
            StageCommand {
                program: PathBuf::from("sh"),
                args: vec!["-c".to_string(), script.to_string()],
            },
        )
    }

    #[test]
    #[cfg(unix)]
    fn test_nonzero_stage_exit_does_not_halt_the_pipeline() {
        // Regression guard for the swallowed-subprocess-failure behavior:
        // with the default Continue policy a failing clean stage must not
        // stop the store stage from running.
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("etl_log.txt");
        let marker = dir.path().join("store_ran");

        let orchestrator = Orchestrator::new(
            &log_file,
            vec![
                shell_stage(Stage::Fetch, "echo fetched"),
                shell_stage(Stage::Clean, "echo cleaning failed >&2; exit 3"),
                shell_stage(Stage::Store, &format!("touch {}", marker.display())),
            ],
        );

        let notifier = RecordingNotifier::new();
        let reports = orchestrator.run(&notifier).unwrap();

        assert_eq!(reports.len(), 3);
        assert!(reports[0].succeeded());
        assert!(!reports[1].succeeded());
        assert_eq!(reports[1].status.code(), Some(3));
        assert!(marker.exists(), "store stage did not run");

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "ETL Success");
    }

    #[test]
    #[cfg(unix)]
    fn test_abort_policy_stops_after_failed_stage() {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("etl_log.txt");
        let marker = dir.path().join("store_ran");

        let orchestrator = Orchestrator::new(
            &log_file,
            vec![
                shell_stage(Stage::Clean, "exit 1"),
                shell_stage(Stage::Store, &format!("touch {}", marker.display())),
            ],
        )
        .with_policy(FailurePolicy::Abort);

        let notifier = RecordingNotifier::new();
        let result = orchestrator.run(&notifier);

        assert!(matches!(result, Err(EtlError::Stage { .. })));
        assert!(!marker.exists());

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "ETL Failed");
    }

    #[test]
    #[cfg(unix)]
    fn test_spawn_failure_notifies_then_propagates() {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("etl_log.txt");

        let orchestrator = Orchestrator::new(
            &log_file,
            vec![(
                Stage::Fetch,
                StageCommand {
                    program: dir.path().join("no-such-binary"),
                    args: vec![],
                },
            )],
        );

        let notifier = RecordingNotifier::new();
        let result = orchestrator.run(&notifier);

        assert!(matches!(result, Err(EtlError::Stage { .. })));

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "ETL Failed");
        assert!(sent[0].1.contains("ETL failed with error"));
        assert!(sent[0].1.contains("fetch"));
    }

    #[test]
    #[cfg(unix)]
    fn test_run_log_is_append_only_with_headers_and_stage_output() {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("etl_log.txt");

        let orchestrator = Orchestrator::new(
            &log_file,
            vec![shell_stage(Stage::Fetch, "echo hello from fetch")],
        );

        let notifier = RecordingNotifier::new();
        orchestrator.run(&notifier).unwrap();
        orchestrator.run(&notifier).unwrap();

        let log = fs::read_to_string(&log_file).unwrap();
        assert_eq!(log.matches("----- ETL RUN at ").count(), 2);
        assert_eq!(log.matches("Fetching weather data...").count(), 2);
        assert_eq!(log.matches("hello from fetch").count(), 2);
        assert_eq!(log.matches("ETL completed.").count(), 2);
    }
}
