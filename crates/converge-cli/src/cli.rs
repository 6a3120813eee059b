use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use converge_core::Timeouts;

use crate::config::ConvergeConfig;

#[derive(Debug, Parser)]
#[command(
    name = "converge",
    version,
    about = "Wait for Amazon MSK resources to reach their desired state"
)]
pub struct Cli {
    /// AWS region; overrides the config file.
    #[arg(long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// AWS shared-config profile; overrides the config file.
    #[arg(long, global = true, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Path to a config file instead of the default location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Give up after this many seconds (0 = no limit).
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Poll at a fixed interval, in seconds, instead of backing off.
    #[arg(long, global = true)]
    pub poll_interval: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Wait until a cluster leaves CREATING and becomes ACTIVE.
    ClusterCreated { arn: String },
    /// Wait until a DELETING cluster no longer exists.
    ClusterDeleted { arn: String },
    /// Wait until a cluster operation reaches UPDATE_COMPLETE.
    OperationCompleted { arn: String },
    /// Wait until a DELETING configuration no longer exists.
    ConfigurationDeleted { arn: String },
    /// Write the effective settings to the config file. `--timeout` sets
    /// the create, update and delete timeouts alike.
    InitConfig,
}

/// Effective settings after layering CLI flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub timeout: Duration,
    /// `--timeout`, when given.
    pub timeout_override: Option<Duration>,
    pub poll_interval: Option<Duration>,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &ConvergeConfig) -> Self {
        let default_timeout = match cli.command {
            Command::ClusterCreated { .. } => config.timeouts.create,
            Command::OperationCompleted { .. } => config.timeouts.update,
            Command::ClusterDeleted { .. }
            | Command::ConfigurationDeleted { .. }
            | Command::InitConfig => config.timeouts.delete,
        };

        let timeout_override = cli.timeout.map(Duration::from_secs);
        Self {
            region: cli.region.clone().or_else(|| config.region.clone()),
            profile: cli.profile.clone().or_else(|| config.profile_name.clone()),
            timeout: timeout_override.unwrap_or(default_timeout),
            timeout_override,
            poll_interval: cli
                .poll_interval
                .or(config.poll_interval_secs)
                .map(Duration::from_secs),
        }
    }

    /// Fold flags back into a config for `init-config`.
    pub fn apply_to(&self, config: &ConvergeConfig) -> ConvergeConfig {
        ConvergeConfig {
            region: self.region.clone(),
            profile_name: self.profile.clone(),
            poll_interval_secs: self.poll_interval.map(|d| d.as_secs()),
            timeouts: match self.timeout_override {
                Some(timeout) => Timeouts {
                    create: timeout,
                    update: timeout,
                    delete: timeout,
                },
                None => config.timeouts,
            },
            ..config.clone()
        }
    }
}
