//! Vigil CLI
//!
//! Probes a single AWS Auto Scaling group and prints its normalized
//! attributes.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};
use vigil_aws::AutoScalingConfig;

use crate::config::VigilConfig;

/// Check the live configuration of cloud resources.
#[derive(Parser, Debug)]
#[command(name = "vigil", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(
        short,
        long,
        env = "VIGIL_CONFIG",
        default_value = "vigil.toml",
        global = true
    )]
    config: PathBuf,

    /// AWS region. Overrides the config file.
    #[arg(long, env = "AWS_REGION", global = true)]
    region: Option<String>,

    /// Named AWS profile. Overrides the config file.
    #[arg(long, env = "AWS_PROFILE", global = true)]
    profile: Option<String>,

    /// Endpoint URL override (e.g. `LocalStack`).
    #[arg(long, global = true)]
    endpoint_url: Option<String>,

    /// Output format. Overrides the config file.
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe one Auto Scaling group.
    #[command(visible_alias = "asg")]
    AutoScalingGroup(commands::asg::AsgArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = VigilConfig::load(&cli.config)?;
    config.apply_overrides(
        cli.region.clone(),
        cli.profile.clone(),
        cli.endpoint_url.clone(),
    );
    let format = cli.format.unwrap_or(config.output.format);
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::AutoScalingGroup(args) => {
            commands::asg::run(&args, AutoScalingConfig::from_base(config.aws), format).await
        }
    }
}
