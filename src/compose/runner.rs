//! Compose command execution

use super::command::ComposeCommand;
use crate::error::{DockerizerError, Result};
use serde::Serialize;
use std::path::Path;
use std::process::{Command, Stdio};

/// Outcome of running one compose command
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    /// Command that was run
    pub command: ComposeCommand,
    /// True when the process exited with status 0
    pub succeeded: bool,
    /// Exit code, absent when the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Decoded stdout and stderr, only present when capture was requested
    pub output: Option<String>,
}

/// Runs compose commands
///
/// Implementations block until the command finishes. A non-zero exit is
/// reported through `succeeded`; only a failure to launch is an error.
pub trait CommandRunner {
    /// Run `command` inside `workdir`
    fn run(&self, command: &ComposeCommand, workdir: &Path, capture: bool)
        -> Result<ExecutionResult>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        command: &ComposeCommand,
        workdir: &Path,
        capture: bool,
    ) -> Result<ExecutionResult> {
        tracing::debug!("Running `{}` in {}", command, workdir.display());

        let mut process = Command::new(command.program());
        process.args(command.args()).current_dir(workdir);

        let spawn_error = |source| DockerizerError::Spawn {
            program: command.program().to_string(),
            source,
        };

        let (status, output) = if capture {
            let out = process.output().map_err(spawn_error)?;
            let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&out.stderr));
            (out.status, Some(text))
        } else {
            let status = process
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .map_err(spawn_error)?;
            (status, None)
        };

        let result = ExecutionResult {
            command: command.clone(),
            succeeded: status.success(),
            exit_code: status.code(),
            output,
        };

        if result.succeeded {
            tracing::debug!("`{}` finished successfully", command);
        } else {
            tracing::warn!("`{}` failed with status {}", command, status);
        }

        Ok(result)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::compose::command::{CommandBuilder, ComposeTool};

    fn command(tool: ComposeTool, services: &[&str]) -> ComposeCommand {
        CommandBuilder::new(tool, services.iter().map(|s| s.to_string()).collect()).pull()
    }

    #[test]
    fn test_zero_exit_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let result = SystemRunner::new()
            .run(&command(ComposeTool::new("true"), &[]), dir.path(), false)
            .unwrap();

        assert!(result.succeeded);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.output.is_none());
    }

    #[test]
    fn test_nonzero_exit_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ComposeTool::new("sh").arg("-c").arg("exit 3").arg("sh");
        let result = SystemRunner::new()
            .run(&command(tool, &["web"]), dir.path(), false)
            .unwrap();

        assert!(!result.succeeded);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn test_capture_output() {
        let dir = tempfile::tempdir().unwrap();
        let result = SystemRunner::new()
            .run(&command(ComposeTool::new("echo"), &["web", "db"]), dir.path(), true)
            .unwrap();

        assert!(result.succeeded);
        assert_eq!(result.output.as_deref(), Some("pull web db\n"));
    }

    #[test]
    fn test_runs_in_workdir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("compose.yaml"), "services: {}\n").unwrap();

        let tool = ComposeTool::new("sh").arg("-c").arg("test -f compose.yaml").arg("sh");
        let result = SystemRunner::new()
            .run(&command(tool, &[]), dir.path(), false)
            .unwrap();

        assert!(result.succeeded);
    }

    #[test]
    fn test_capture_includes_stderr_after_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ComposeTool::new("sh")
            .arg("-c")
            .arg("echo out; echo err >&2; exit 2")
            .arg("sh");
        let result = SystemRunner::new()
            .run(&command(tool, &[]), dir.path(), true)
            .unwrap();

        assert!(!result.succeeded);
        assert_eq!(result.exit_code, Some(2));
        assert_eq!(result.output.as_deref(), Some("out\nerr\n"));
    }

    #[test]
    fn test_killed_process_has_no_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ComposeTool::new("sh")
            .arg("-c")
            .arg("echo out; echo err >&2; kill -9 $$")
            .arg("sh");

        let captured = SystemRunner::new()
            .run(&command(tool.clone(), &[]), dir.path(), true)
            .unwrap();
        assert!(!captured.succeeded);
        assert_eq!(captured.exit_code, None);
        assert_eq!(captured.output.as_deref(), Some("out\nerr\n"));

        let discarded = SystemRunner::new()
            .run(&command(tool, &[]), dir.path(), false)
            .unwrap();
        assert!(!discarded.succeeded);
        assert_eq!(discarded.exit_code, None);
        assert!(discarded.output.is_none());
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ComposeTool::new("dockerizer-no-such-compose-binary");

        for capture in [true, false] {
            let err = SystemRunner::new()
                .run(&command(tool.clone(), &[]), dir.path(), capture)
                .unwrap_err();

            match err {
                DockerizerError::Spawn { program, source } => {
                    assert_eq!(program, "dockerizer-no-such-compose-binary");
                    assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
                }
                other => panic!("expected spawn error, got {other:?}"),
            }
        }
    }
}
