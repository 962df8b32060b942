//! GeoVocab — geological vocabulary extraction pipeline.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use geovocab_cli::pipeline::{self, PipelineReport};
use geovocab_cli::{Cli, Command};
use geovocab_core::PipelineConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = PipelineConfig::from_env()?;
    cli.command.apply(&mut config);

    let report = match &cli.command {
        Command::Extract { .. } => PipelineReport {
            extract: Some(pipeline::extract(&config).await?),
            ..Default::default()
        },
        Command::Aggregate { top, .. } => PipelineReport {
            aggregate: Some(pipeline::aggregate(&config, *top)?),
            ..Default::default()
        },
        Command::Filter { .. } => PipelineReport {
            filter: Some(pipeline::filter(&config)?),
            ..Default::default()
        },
        Command::Run { top } => pipeline::run_all(&config, *top).await?,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!("Done");
    }

    Ok(())
}
