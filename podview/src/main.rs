use anyhow::Result;
use clap::Parser;
use tracing::info;

use podview::{config::Config, context::AppContext, http, k8s::ClusterApi, render::Renderer};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse the configuration first, it holds the log level.
    let config = Config::parse();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Parsed configuration: {:?}", config);

    // Templates are parsed once, a broken template must stop the process here.
    let renderer = Renderer::new()?;

    let cluster = ClusterApi::from_env();
    if cluster.is_some() {
        info!("Kubernetes API lookups are enabled");
    }

    let ctx = AppContext::new(config, renderer, cluster).into_shared();
    info!("Serving status page for pod {:?}", ctx.pod_name);

    http::serve(ctx).await?;

    info!("Exiting");
    Ok(())
}
