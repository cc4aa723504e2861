mod cli;
mod config;
mod report;

use std::{fs, io::Write, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use fluid_core::{ClusterSnapshot, Engine, MemoryCluster, ReaderHandle, RuntimeInfoBuilder};
use fluid_kube::KubeCluster;
use fluid_observe::init_logger;
use fluid_prometheus::{Encoder, PrometheusMetrics, TextEncoder};

use crate::{cli::Cli, config::FileConfig, report::Report};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1) config + logger
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let cfg = file.merge_cli(&cli)?;
    init_logger(&cfg.logger)?;
    debug!(?cfg, "configuration loaded");

    // 2) resolve
    let metrics = PrometheusMetrics::new()?;
    let out = run(&cli, cfg, &metrics).await?;
    println!("{out}");

    // 3) metrics
    if cli.metrics {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&metrics.gather(), &mut buf)?;
        std::io::stderr().write_all(&buf)?;
    }
    Ok(())
}

/// Resolve the runtime named on the command line and render the report as JSON.
async fn run(cli: &Cli, cfg: FileConfig, metrics: &PrometheusMetrics) -> anyhow::Result<String> {
    let reader: ReaderHandle = match &cli.fixture {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading fixture {}", path.display()))?;
            let snapshot: ClusterSnapshot = serde_json::from_str(&raw)
                .with_context(|| format!("parsing fixture {}", path.display()))?;
            Arc::new(MemoryCluster::from_snapshot(snapshot))
        }
        None => Arc::new(KubeCluster::try_default().await?),
    };

    let builder = RuntimeInfoBuilder::new(reader)
        .with_config(cfg.resolve)
        .with_metrics(Arc::new(metrics.clone()));
    let engine = Engine::new(cli.kind, cli.name.clone(), cli.namespace.clone(), builder)?;

    let info = engine.runtime_info().await?;
    info!(
        name = info.name(),
        namespace = info.namespace(),
        "runtime resolved"
    );
    Ok(serde_json::to_string_pretty(&Report::new(&info))?)
}
