//! Compose command construction
//!
//! Commands are kept as structured argument lists and handed straight to
//! the process spawner, so no shell quoting is involved. The rendered text
//! form is only used for display and the task log.

use crate::error::{DockerizerError, Result};
use serde::Serialize;
use std::fmt;

/// Default compose executable
pub const DEFAULT_COMPOSE_PROGRAM: &str = "docker-compose";

/// Compose lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Pull service images
    Pull,
    /// Build service images from their build contexts
    Build,
    /// Create and start services
    Up,
    /// Stop and remove services
    Down,
}

impl Operation {
    /// Compose subcommand for this operation
    pub fn subcommand(&self) -> &'static str {
        match self {
            Operation::Pull => "pull",
            Operation::Build => "build",
            Operation::Up => "up",
            Operation::Down => "down",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

/// The compose executable and any arguments that precede the subcommand
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposeTool {
    /// Program looked up on the search path
    pub program: String,
    /// Leading arguments (e.g. `compose` for `docker compose`)
    pub base_args: Vec<String>,
}

impl ComposeTool {
    /// Create a tool from a bare program name
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
        }
    }

    /// Add a leading argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.base_args.push(arg.into());
        self
    }

    /// Parse a whitespace separated tool string such as `docker compose`
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let program = parts.next().ok_or_else(|| {
            DockerizerError::InvalidConfig("compose command must not be empty".to_string())
        })?;

        Ok(Self {
            program: program.to_string(),
            base_args: parts.map(str::to_string).collect(),
        })
    }
}

impl Default for ComposeTool {
    fn default() -> Self {
        Self::new(DEFAULT_COMPOSE_PROGRAM)
    }
}

/// A single compose invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposeCommand {
    /// Executable to run
    pub tool: ComposeTool,
    /// Lifecycle operation
    pub operation: Operation,
    /// Operation flags, in order
    pub flags: Vec<String>,
    /// Target services, in order; empty means all services
    pub services: Vec<String>,
}

impl ComposeCommand {
    /// Program to spawn
    pub fn program(&self) -> &str {
        &self.tool.program
    }

    /// Full argument list passed to the program
    pub fn args(&self) -> Vec<String> {
        let mut args = self.tool.base_args.clone();
        args.push(self.operation.subcommand().to_string());
        args.extend(self.flags.iter().cloned());
        args.extend(self.services.iter().cloned());
        args
    }
}

impl fmt::Display for ComposeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tool.program)?;
        for arg in self.args() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Builds compose commands for a fixed set of services
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    tool: ComposeTool,
    services: Vec<String>,
}

impl CommandBuilder {
    /// Create a builder; an empty service list targets all services
    pub fn new(tool: ComposeTool, services: Vec<String>) -> Self {
        Self { tool, services }
    }

    /// Services every command targets
    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// Pull images
    pub fn pull(&self) -> ComposeCommand {
        self.command(Operation::Pull, Vec::new())
    }

    /// Build images
    pub fn build(&self) -> ComposeCommand {
        self.command(Operation::Build, Vec::new())
    }

    /// Start services, optionally in the background
    pub fn up(&self, detached: bool) -> ComposeCommand {
        let flags = if detached { vec!["-d".to_string()] } else { Vec::new() };
        self.command(Operation::Up, flags)
    }

    /// Stop and remove services, optionally with their named volumes
    pub fn down(&self, volumes: bool) -> ComposeCommand {
        let flags = if volumes { vec!["-v".to_string()] } else { Vec::new() };
        self.command(Operation::Down, flags)
    }

    fn command(&self, operation: Operation, flags: Vec<String>) -> ComposeCommand {
        ComposeCommand {
            tool: self.tool.clone(),
            operation,
            flags,
            services: self.services.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(services: &[&str]) -> CommandBuilder {
        CommandBuilder::new(
            ComposeTool::default(),
            services.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_pull_keeps_service_order() {
        let cmd = builder(&["web", "db", "cache"]).pull();
        assert_eq!(cmd.args(), vec!["pull", "web", "db", "cache"]);
        assert_eq!(cmd.to_string(), "docker-compose pull web db cache");
    }

    #[test]
    fn test_pull_all_services() {
        let cmd = builder(&[]).pull();
        assert_eq!(cmd.args(), vec!["pull"]);
        assert_eq!(cmd.to_string(), "docker-compose pull");
    }

    #[test]
    fn test_up_detached_adds_only_flag() {
        let b = builder(&["web", "db"]);
        let attached = b.up(false).args();
        let detached = b.up(true).args();

        assert_eq!(detached.len(), attached.len() + 1);
        let without_flag: Vec<_> = detached.iter().filter(|a| *a != "-d").cloned().collect();
        assert_eq!(without_flag, attached);
        assert_eq!(b.up(true).to_string(), "docker-compose up -d web db");
    }

    #[test]
    fn test_service_lists() {
        let cases: &[&[&str]] = &[
            &[],
            &["web"],
            &["db", "web"],
            &["web", "db", "cache", "worker"],
            &["a-1", "b_2", "c.3"],
        ];

        for services in cases {
            let b = builder(services);
            for cmd in [b.pull(), b.build(), b.up(false), b.down(false)] {
                let args = cmd.args();
                assert_eq!(&args[1..], *services, "{}", cmd);
                for name in services.iter() {
                    assert_eq!(args.iter().filter(|a| a == name).count(), 1);
                }
                assert!(!cmd.to_string().contains("  "));
            }

            let attached = b.up(false).args();
            let detached = b.up(true).args();
            assert_eq!(detached[0], "up");
            assert_eq!(detached[1], "-d");
            assert_eq!(detached[2..], attached[1..]);

            let kept = b.down(false).args();
            let removed = b.down(true).args();
            assert_eq!(removed[1], "-v");
            assert_eq!(removed[2..], kept[1..]);
        }
    }

    #[test]
    fn test_operation_display() {
        let ops = [Operation::Pull, Operation::Build, Operation::Up, Operation::Down];
        let names: Vec<String> = ops.iter().map(|op| op.to_string()).collect();
        assert_eq!(names, vec!["pull", "build", "up", "down"]);
    }

    #[test]
    fn test_down_volumes() {
        let b = builder(&[]);
        assert_eq!(b.down(false).to_string(), "docker-compose down");
        assert_eq!(b.down(true).to_string(), "docker-compose down -v");
        assert_eq!(b.down(true).flags, vec!["-v"]);
    }

    #[test]
    fn test_build() {
        let cmd = builder(&["api"]).build();
        assert_eq!(cmd.operation, Operation::Build);
        assert_eq!(cmd.to_string(), "docker-compose build api");
    }

    #[test]
    fn test_plugin_tool() {
        let tool = ComposeTool::parse("docker  compose").unwrap();
        assert_eq!(tool, ComposeTool::new("docker").arg("compose"));

        let cmd = CommandBuilder::new(tool, vec!["web".to_string()]).up(true);
        assert_eq!(cmd.program(), "docker");
        assert_eq!(cmd.args(), vec!["compose", "up", "-d", "web"]);
        assert_eq!(cmd.to_string(), "docker compose up -d web");
    }

    #[test]
    fn test_empty_tool_rejected() {
        assert!(matches!(
            ComposeTool::parse("   "),
            Err(DockerizerError::InvalidConfig(_))
        ));
    }
}
