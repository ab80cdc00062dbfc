mod config;
mod gemini;
mod llm_client;
mod logging;
mod models;
mod request_id;
mod router;

use clap::Parser;
use config::Config;
use router::AppState;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "gemini-proxy")]
#[command(about = "Relays text prompts to the Gemini generateContent API")]
struct Args {
    #[arg(short, long, default_value = "0.0.0.0")]
    ip: String,

    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Optional YAML config file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Also write logs to this file (capped at 10 MiB)
    #[arg(long)]
    log_file: Option<String>,

    /// socks and http proxy for upstream calls, example: socks5://192.168.0.2:10080
    #[arg(long)]
    proxy: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = Level::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using INFO level.", args.log_level);
        Level::INFO
    });
    logging::init_logging(log_level, args.log_file.as_deref());

    let config = match &args.config {
        Some(path) => {
            let config = Config::from_file(path)?;
            info!("Configuration loaded successfully from: {}", path);
            config
        }
        None => Config::default(),
    };
    info!(
        "Upstream: {} model {} ({:?} upstream errors)",
        config.api_base, config.model, config.upstream_errors
    );
    if config.api_key().is_none() {
        // read again on every request
        warn!("${} is not set; requests will fail until it is", config.api_key_env);
    }

    let client_builder = reqwest::Client::builder();
    let client_builder = match &args.proxy {
        Some(proxy) => client_builder.proxy(reqwest::Proxy::all(proxy)?),
        None => client_builder,
    };
    let http_client = Arc::new(client_builder.build()?);

    let app_state = AppState::new(config, llm_client::LlmClient::new(http_client));
    let app = router::app(app_state);

    let bind_address = format!("{}:{}", args.ip, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server started on http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
