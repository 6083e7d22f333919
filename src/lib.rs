pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;

use anyhow::Context;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;
pub use db::Store;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.command() == Commands::Init {
        return cli::commands::cmd_init();
    }

    let config = Config::load()?;
    config.validate()?;

    init_tracing(&config)?;

    match cli.command() {
        Commands::PopulateDb => cli::commands::cmd_populate_db(&config).await,
        Commands::Serve => {
            let prometheus_handle = install_metrics_recorder(&config)?;
            cli::commands::cmd_serve(config, prometheus_handle).await
        }
        Commands::Init => Ok(()),
    }
}

fn install_metrics_recorder(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    use metrics_exporter_prometheus::PrometheusBuilder;
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let observability = &config.observability;
    if observability.loki_enabled {
        let url = url::Url::parse(&observability.loki_url).context("Invalid Loki URL")?;

        let mut builder = tracing_loki::builder();
        for (key, value) in &observability.loki_labels {
            builder = builder.label(key.as_str(), value.as_str())?;
        }
        let (layer, task) = builder.build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!("Loki logging initialized at {}", observability.loki_url);
    } else {
        registry.init();
    }

    Ok(())
}
