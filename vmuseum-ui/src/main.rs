//! vmuseum-ui - front-end server for the virtual museum
//!
//! Serves the public gallery and the admin pages. Default port 8080.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use vmuseum_common::config;
use vmuseum_ui::{build_router, ClientConfig, UiState};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "vmuseum-ui")]
#[command(about = "Virtual museum front-end server", long_about = None)]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides APP_PORT, PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Catalog API base URL published to the browser
    #[arg(long, env = "VMUSEUM_API_URL")]
    api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut toml_config = config::load_config(args.config.as_deref())?;
    let log_level = config::resolve_log_level(args.log_level.as_deref(), &toml_config);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    info!("Starting vmuseum-ui v{}", env!("CARGO_PKG_VERSION"));

    if let Some(api_url) = args.api_url {
        toml_config.ui.api_url = api_url;
    }
    let client_config = ClientConfig::from(&toml_config.ui);
    info!("Catalog API: {}", client_config.api_url);
    if client_config.google_client_id.is_none() {
        info!("No Google client id configured, admin sign-in button will be unavailable");
    }

    let app = build_router(UiState::new(client_config));

    let port = config::resolve_port(args.port, &["APP_PORT", "PORT"], toml_config.ui.port);
    let addr = format!("{}:{}", toml_config.ui.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("vmuseum-ui listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
