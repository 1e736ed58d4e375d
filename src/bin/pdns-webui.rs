use std::{env, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use pdns_webui::{
    AppState, SharedState,
    config::{self, AppConfig, ConfigOverrides, FileConfig},
    powerdns::PowerDnsClient,
    web::{self, render::Templates},
};
use tokio::signal;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    /// Path to a TOML or JSON configuration file [default: ./config.json if present]
    #[arg(long, value_name = "PATH", env = "CONFIG_FILE")]
    config: Option<PathBuf>,
    /// PowerDNS base URL (e.g. http://127.0.0.1:8081)
    #[arg(long, value_name = "URL", env = "POWERDNS_URL")]
    powerdns_url: Option<String>,
    /// PowerDNS API key
    #[arg(long, value_name = "KEY", env = "PDNS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// PowerDNS server ID
    #[arg(long, value_name = "ID", env = "PDNS_SERVER_ID")]
    server_id: Option<String>,
    /// Address to listen on [default: 0.0.0.0]
    #[arg(long, value_name = "ADDR", env = "LISTEN_ADDRESS")]
    listen_address: Option<String>,
    /// Port to listen on [default: 8080]
    #[arg(long, value_name = "PORT", env = "PORT")]
    port: Option<u16>,
    /// Timeout for each PowerDNS request, in seconds
    #[arg(long, value_name = "SECS", env = "REQUEST_TIMEOUT")]
    request_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = build_app_config(cli)?;
    let state = init_shared_state(config)?;
    let listener = state.config.bind().await.with_context(|| {
        format!(
            "failed to bind to {}:{}",
            state.config.listen_address, state.config.port
        )
    })?;

    let app = web::create_router(state);

    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited with error")?;

    Ok(())
}

fn build_app_config(cli: Cli) -> Result<AppConfig> {
    let cwd = env::current_dir().context("failed to read working directory")?;
    let file = match config::config_file_path(cli.config, &cwd) {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            Some(FileConfig::load(&path)?)
        }
        None => None,
    };

    let overrides = ConfigOverrides {
        powerdns_url: cli.powerdns_url,
        api_key: cli.api_key,
        server_id: cli.server_id,
        listen_address: cli.listen_address,
        port: cli.port,
        request_timeout_secs: cli.request_timeout,
    };

    config::resolve(file, overrides).context("invalid configuration")
}

fn init_shared_state(config: AppConfig) -> Result<SharedState> {
    let mut http = reqwest::Client::builder();
    if let Some(timeout) = config.request_timeout {
        http = http.timeout(timeout);
    }
    let http = http.build().context("failed to build HTTP client")?;

    info!(
        "using PowerDNS at {} (server id '{}')",
        config.pdns.base_url, config.pdns.server_id
    );
    let pdns = PowerDnsClient::with_http(config.pdns.clone(), http);
    let templates = Templates::new().context("failed to load templates")?;

    Ok(Arc::new(AppState {
        config,
        pdns,
        templates,
    }))
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("failed to install CTRL+C handler: {err}");
    }
    info!("shutdown signal received");
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
