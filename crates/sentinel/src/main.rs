use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use sentinel::runtime::boot;
use sentinel::runtime::report::{ClusterListing, StatusReport};

#[derive(Debug, Parser)]
#[command(name = "sentinel", version, about = "Network zone status and report path resolution")]
struct Cli {
    /// Path to the TOML configuration file; defaults to SENTINEL_CONFIG_FILE
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Per-zone security status from the attack log
    Status {
        /// Attack log to read instead of the configured one
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Report file locations for a cluster
    Artifacts {
        cluster_id: u32,
        /// Static root to inspect instead of the configured one
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Area and configured naming token for a cluster
    Identify { cluster_id: u32 },
    /// Configured clusters and their areas
    Clusters,
}

fn main() -> Result<()> {
    boot::init_logging();
    let cli = Cli::parse();

    let state = boot::boot(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Status { log } => {
            let report = match log {
                Some(path) => StatusReport::new(
                    path.display().to_string(),
                    state.status_parser.parse_file(&path),
                ),
                None => StatusReport::new(state.config.attack_log_path.clone(), state.zone_status()),
            };
            print_json(&report)
        }
        Command::Artifacts { cluster_id, root } => {
            let resolved = match root {
                Some(root) => state.artifact_resolver.resolve(cluster_id, &root),
                None => state.artifacts(cluster_id),
            };
            print_json(&resolved)
        }
        Command::Identify { cluster_id } => print_json(&state.identity(cluster_id)),
        Command::Clusters => print_json(&ClusterListing::from_state(&state)),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}
