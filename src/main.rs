use anyhow::{Context, Result};
use clap::Parser;
use madlibs_server::api;
use madlibs_server::app::MadLibsApp;
use madlibs_server::models::Config;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "madlibs-server")]
#[command(about = "Serve the MadLibs generation API")]
struct CliArgs {
    /// Address to bind (overrides API_HOST).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides API_PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Directory for generated images (overrides MADLIBS_IMAGE_DIR).
    #[arg(long, value_name = "DIR")]
    image_dir: Option<PathBuf>,
}

fn socket_addr(host: &str, port: &str) -> Result<SocketAddr> {
    let ip: IpAddr = host
        .parse()
        .with_context(|| format!("Invalid host '{}'", host))?;
    let port: u16 = port
        .parse()
        .with_context(|| format!("Invalid port '{}'", port))?;
    Ok(SocketAddr::new(ip, port))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "madlibs_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.api_host = host;
    }
    if let Some(port) = args.port {
        config.api_port = port.to_string();
    }
    if let Some(image_dir) = args.image_dir {
        config.image_dir = image_dir;
    }

    info!("Starting MadLibs API");

    let app = MadLibsApp::from_config(&config).context("Failed to initialize application")?;
    let router = api::router(Arc::new(app));

    let addr = socket_addr(&config.api_host, &config.api_port)?;
    info!("listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}
