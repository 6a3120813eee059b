use clap::Parser;
use converge_cli::cli::{Cli, Command, Settings};
use converge_cli::{aws, config, report};
use converge_core::WaitContext;
use converge_msk::MskWaiter;
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let file_config = match &cli.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    let settings = Settings::resolve(&cli, &file_config);

    if let Command::InitConfig = cli.command {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => config::config_path()?,
        };
        config::save_config(&path, &settings.apply_to(&file_config))?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let sdk_config =
        aws::build_aws_config(settings.region.as_deref(), settings.profile.as_deref()).await;
    let mut waiter = MskWaiter::new(&sdk_config);
    if let Some(interval) = settings.poll_interval {
        waiter = waiter.with_poll_interval(interval);
    }

    let ctx = WaitContext::new();
    let interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling wait");
            interrupt.cancel();
        }
    });

    match &cli.command {
        Command::ClusterCreated { arn } => {
            report::finish(waiter.cluster_created(&ctx, arn, settings.timeout).await)
        }
        Command::ClusterDeleted { arn } => {
            report::finish(waiter.cluster_deleted(&ctx, arn, settings.timeout).await)
        }
        Command::OperationCompleted { arn } => report::finish(
            waiter
                .cluster_operation_completed(&ctx, arn, settings.timeout)
                .await,
        ),
        Command::ConfigurationDeleted { arn } => report::finish(
            waiter
                .configuration_deleted(&ctx, arn, settings.timeout_override)
                .await,
        ),
        Command::InitConfig => Ok(()),
    }
}
