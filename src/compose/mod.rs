//! Docker Compose lifecycle wrapper
//!
//! This module builds compose commands for a set of services, runs them
//! in a project directory and keeps a log of what was issued.

pub mod command;
pub mod orchestrator;
pub mod project;
pub mod runner;
pub mod tasks;

pub use command::{CommandBuilder, ComposeCommand, ComposeTool, Operation};
pub use orchestrator::{BootstrapReport, ComposeOrchestrator};
pub use project::ProjectDir;
pub use runner::{CommandRunner, ExecutionResult, SystemRunner};
pub use tasks::{TaskLog, TaskLogEntry};
