//! `minisip` binary: loads the configuration, binds the UDP socket and serves
//! until SIGINT or SIGTERM.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn, Level};

use minisip_uas::{parse_log_level, setup_logging, Config, LoggingConfig, SipServer};

#[derive(Parser, Debug)]
#[command(name = "minisip")]
#[command(version, about = "Minimal SIP user agent server")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Generate default config file and exit
    #[arg(long)]
    generate_config: bool,

    /// Override port setting from config file
    #[arg(short, long)]
    port: Option<String>,

    /// Override bind address setting from config file
    #[arg(short, long)]
    bind: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Include source file and line number in log lines
    #[arg(long)]
    log_file_info: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.generate_config {
        Config::default()
            .save(&args.config)
            .context("Error generating config file")?;
        println!("Default configuration file generated: {}", args.config.display());
        return Ok(());
    }

    let (mut config, load_error) = match Config::load(&args.config) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }

    let level_result = parse_log_level(&config.server.log_level);
    let mut logging = LoggingConfig::new(*level_result.as_ref().unwrap_or(&Level::INFO), "minisip");
    if args.json_logs {
        logging = logging.with_json();
    }
    if args.log_file_info {
        logging = logging.with_file_info();
    }
    setup_logging(logging)?;

    if let Some(e) = load_error {
        warn!("{}", e);
        warn!("Using default configuration");
    }
    if let Err(e) = level_result {
        warn!("{}, falling back to info", e);
    }

    let server = SipServer::new(&config);
    let transport = server.bind().await.context("Server startup error")?;

    println!(
        "SIP server started on {}:{}",
        config.server.bind_addr, config.server.port
    );
    println!("Press Ctrl+C to exit...");

    tokio::select! {
        result = server.serve(transport) => result?,
        _ = shutdown_signal() => {
            println!("\nShutting down server...");
            info!("Shutdown signal received, exiting without draining handlers");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
