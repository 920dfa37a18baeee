//! vmuseum-api - catalog REST API for the virtual museum
//!
//! Serves the local item/collection catalog and the public collection
//! endpoints. Default port 3000.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use vmuseum_api::api::AdminPolicy;
use vmuseum_api::services::met::{MetCatalog, MetSettings};
use vmuseum_api::store::CatalogStore;
use vmuseum_api::{build_router, AppState};
use vmuseum_common::config;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "vmuseum-api")]
#[command(about = "Virtual museum catalog API", long_about = None)]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Catalog data file
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = config::load_config(args.config.as_deref())?;
    let log_level = config::resolve_log_level(args.log_level.as_deref(), &toml_config);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    info!(
        "Starting vmuseum-api v{}",
        env!("CARGO_PKG_VERSION")
    );

    let data_file = config::resolve_data_file(args.data_file.as_deref(), &toml_config);
    info!("Catalog data file: {}", data_file.display());
    let store = CatalogStore::open(data_file).await;

    let settings = MetSettings::from(&toml_config.met);
    info!(
        base_url = %settings.base_url,
        cache_validity_secs = settings.cache_validity.as_secs(),
        "Public collection configured"
    );
    let catalog = MetCatalog::new(settings)?;

    let admin = AdminPolicy::from(&toml_config.admin);
    if admin.require_login {
        info!(
            allowed = admin.allowed_emails.len(),
            "Admin routes require a signed-in account"
        );
    } else {
        info!("Admin routes are not gated server-side");
    }

    let state = AppState::new(store, catalog, admin);
    let app = build_router(state);

    let port = config::resolve_port(args.port, &["PORT"], toml_config.api.port);
    let addr = format!("{}:{}", toml_config.api.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("vmuseum-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
