//! Dockerizer - a docker-compose lifecycle wrapper
//!
//! Dockerizer drives an external compose tool for one project directory:
//!
//! - Pull, build, start and stop services
//! - Bootstrap a development environment (pull, up, build, down)
//! - Keep an ordered log of every command and its outcome
//!
//! Commands are spawned directly with the project directory as their
//! working directory; the process working directory is never changed.

pub mod compose;
pub mod error;

pub use compose::{BootstrapReport, ComposeOrchestrator};
pub use error::{DockerizerError, Result};
