//! Dockerizer - a docker-compose lifecycle wrapper
//!
//! This is the main CLI entry point for Dockerizer.

use clap::{Parser, Subcommand};
use dockerizer::compose::{ComposeOrchestrator, ComposeTool, SystemRunner, TaskLogEntry};
use dockerizer::error::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Dockerizer - docker-compose lifecycle wrapper
#[derive(Parser)]
#[command(name = "dockerizer")]
#[command(author = "Evoker Industries")]
#[command(version)]
#[command(about = "Pull, build, start and stop docker-compose services", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Project directory containing the compose file [default: current directory]
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// Compose command to run (e.g. "docker compose")
    #[arg(
        long,
        global = true,
        env = "DOCKERIZER_COMPOSE",
        default_value = "docker-compose"
    )]
    compose: String,

    /// Print the task log as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull service images
    Pull {
        /// Service names (all services when empty)
        services: Vec<String>,
    },
    /// Build service images
    Build {
        /// Service names (all services when empty)
        services: Vec<String>,
    },
    /// Create and start services
    Up {
        /// Run in detached mode
        #[arg(short, long)]
        detach: bool,
        /// Service names (all services when empty)
        services: Vec<String>,
    },
    /// Stop and remove services
    Down {
        /// Remove named volumes
        #[arg(short, long)]
        volumes: bool,
        /// Service names (all services when empty)
        services: Vec<String>,
    },
    /// Pull, start detached, build, then stop with volumes removed
    Bootstrap {
        /// Service names (all services when empty)
        services: Vec<String>,
    },
}

/// JSON form of a finished session
#[derive(Serialize)]
struct Report {
    succeeded: bool,
    entries: Vec<TaskLogEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<u128>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let tool = ComposeTool::parse(&cli.compose)?;
    let directory = match cli.directory {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let services = match &cli.command {
        Commands::Pull { services }
        | Commands::Build { services }
        | Commands::Up { services, .. }
        | Commands::Down { services, .. }
        | Commands::Bootstrap { services } => services.clone(),
    };

    let mut orchestrator =
        ComposeOrchestrator::with_runner(&directory, services, tool, SystemRunner::new())?
            .quiet(cli.json);

    let (succeeded, elapsed) = match cli.command {
        Commands::Pull { .. } => (orchestrator.pull()?.succeeded, None),
        Commands::Build { .. } => (orchestrator.build()?.succeeded, None),
        Commands::Up { detach, .. } => (orchestrator.up_with(detach)?.succeeded, None),
        Commands::Down { volumes, .. } => (orchestrator.down_with(volumes)?.succeeded, None),
        Commands::Bootstrap { .. } => {
            let report = orchestrator.bootstrap()?;
            for failed in report.failures() {
                tracing::error!("Bootstrap step failed: {}", failed.command);
            }
            (report.succeeded(), Some(report.elapsed))
        }
    };

    let log = orchestrator.finish();

    if cli.json {
        let report = Report {
            succeeded,
            entries: log.entries(),
            elapsed_ms: elapsed.map(|e| e.as_millis()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        for entry in log.entries() {
            println!("{}", entry.command_text);
            if let Some(outcome) = &entry.outcome_message {
                println!("  -> {}", outcome);
            }
        }
    }

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}
