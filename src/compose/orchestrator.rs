//! Docker Compose lifecycle orchestrator

use super::command::{CommandBuilder, ComposeCommand, ComposeTool};
use super::project::ProjectDir;
use super::runner::{CommandRunner, ExecutionResult, SystemRunner};
use super::tasks::TaskLog;
use crate::error::Result;
use std::path::Path;
use std::time::{Duration, Instant};

/// Outcome of a bootstrap sequence
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// One result per step, in pull, up, build, down order
    pub results: Vec<ExecutionResult>,
    /// Wall-clock time for the whole sequence
    pub elapsed: Duration,
}

impl BootstrapReport {
    /// Whether every step succeeded
    pub fn succeeded(&self) -> bool {
        self.results.iter().all(|r| r.succeeded)
    }

    /// Steps that failed
    pub fn failures(&self) -> impl Iterator<Item = &ExecutionResult> {
        self.results.iter().filter(|r| !r.succeeded)
    }
}

/// Compose orchestrator
///
/// Runs compose lifecycle commands for one project directory and a fixed
/// set of services, recording each command and its outcome in a task log.
pub struct ComposeOrchestrator<R = SystemRunner> {
    /// Project working directory
    project: ProjectDir,
    /// Command construction for the configured services
    commands: CommandBuilder,
    /// Process runner
    runner: R,
    /// Session log
    log: TaskLog,
    /// Suppress progress lines on stdout
    quiet: bool,
}

impl ComposeOrchestrator<SystemRunner> {
    /// Create an orchestrator using the default compose tool
    pub fn new(directory: impl AsRef<Path>, services: Vec<String>) -> Result<Self> {
        Self::with_runner(directory, services, ComposeTool::default(), SystemRunner::new())
    }
}

impl<R: CommandRunner> ComposeOrchestrator<R> {
    /// Create an orchestrator with an explicit tool and runner
    pub fn with_runner(
        directory: impl AsRef<Path>,
        services: Vec<String>,
        tool: ComposeTool,
        runner: R,
    ) -> Result<Self> {
        let project = ProjectDir::open(directory)?;

        match project.compose_file() {
            Some(file) => tracing::debug!("Using compose file {}", file.display()),
            None => tracing::warn!("No compose file found in {}", project.path().display()),
        }

        Ok(Self {
            project,
            commands: CommandBuilder::new(tool, services),
            runner,
            log: TaskLog::new(),
            quiet: false,
        })
    }

    /// Stop printing progress lines to stdout
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Project directory commands run in
    pub fn directory(&self) -> &Path {
        self.project.path()
    }

    /// Services targeted by every command
    pub fn services(&self) -> &[String] {
        self.commands.services()
    }

    /// Session log so far
    pub fn log(&self) -> &TaskLog {
        &self.log
    }

    /// End the session and hand back its log
    pub fn finish(self) -> TaskLog {
        tracing::debug!("Closing compose session for {}", self.project.path().display());
        self.log
    }

    /// Pull service images
    pub fn pull(&mut self) -> Result<ExecutionResult> {
        self.progress("Pulling Docker images");
        let result = self.execute(self.commands.pull(), false)?;
        self.log.record_outcome("Pulled docker-compose service images");
        Ok(result)
    }

    /// Build service images
    pub fn build(&mut self) -> Result<ExecutionResult> {
        self.progress("Building docker-compose services");
        let result = self.execute(self.commands.build(), false)?;
        self.log.record_outcome("Built docker-compose services");
        Ok(result)
    }

    /// Start services in the foreground
    pub fn up(&mut self) -> Result<ExecutionResult> {
        self.up_with(false)
    }

    /// Start services, optionally detached
    pub fn up_with(&mut self, detached: bool) -> Result<ExecutionResult> {
        self.progress("Running docker-compose services locally");
        let result = self.execute(self.commands.up(detached), false)?;
        if result.succeeded {
            self.log
                .record_outcome("SUCCESS: Running docker-compose services locally");
        } else {
            self.log.record_outcome(format!(
                "ERROR: Unable to run docker-compose services ({})",
                result.command
            ));
        }
        Ok(result)
    }

    /// Stop and remove services
    pub fn down(&mut self) -> Result<ExecutionResult> {
        self.down_with(false)
    }

    /// Stop and remove services, optionally removing named volumes
    pub fn down_with(&mut self, volumes: bool) -> Result<ExecutionResult> {
        self.progress("Stopping docker-compose services");
        let result = self.execute(self.commands.down(volumes), false)?;
        self.log.record_outcome("Stopped docker-compose services");
        Ok(result)
    }

    /// Refresh the environment: pull, up (detached), build, down (with volumes)
    ///
    /// Every step runs even when an earlier one fails.
    pub fn bootstrap(&mut self) -> Result<BootstrapReport> {
        self.progress("Bootstrapping docker-compose services");
        let started = Instant::now();

        let steps = [
            self.commands.pull(),
            self.commands.up(true),
            self.commands.build(),
            self.commands.down(true),
        ];

        let mut results = Vec::with_capacity(steps.len());
        for command in steps {
            let result = self.execute(command, true)?;
            let status = if result.succeeded { "SUCCESS" } else { "ERROR" };
            self.log
                .record_outcome(format!("{}: {}", status, result.command));
            if let Some(output) = result.output.as_deref().filter(|o| !o.is_empty()) {
                tracing::debug!("{}", output.trim_end());
            }
            results.push(result);
        }

        let elapsed = started.elapsed();
        tracing::info!("Bootstrap finished in {:.2?}", elapsed);
        self.progress(&format!("Bootstrap completed in {:.2?}", elapsed));

        Ok(BootstrapReport { results, elapsed })
    }

    fn progress(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    fn execute(&mut self, command: ComposeCommand, capture: bool) -> Result<ExecutionResult> {
        tracing::info!(operation = %command.operation, "{}", command);
        let result = self.runner.run(&command, self.project.path(), capture)?;
        self.log.record_command(command.to_string());
        Ok(result)
    }
}
