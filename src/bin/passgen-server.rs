//! Password server binary.
//!
//! # Usage
//!
//! ```bash
//! # Serve on the default loopback address
//! passgen-server
//!
//! # Serve on all interfaces, refusing unknown class selectors
//! passgen-server --bind 0.0.0.0:8080 --reject-unknown
//!
//! # Start from a config file
//! passgen-server --config passgen.toml
//! ```

use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use passgen_protocol::config::{PassgenConfig, UnknownClassPolicy};
use passgen_protocol::protocol::Server;
use passgen_protocol::utils::logging;
use passgen_protocol::ProtocolError;
use tokio::sync::mpsc;
use tracing::Level;

/// Password generation server
#[derive(Parser, Debug)]
#[command(name = "passgen-server")]
#[command(about = "UDP password generation server")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind to (overrides the config file)
    #[arg(short, long)]
    bind: Option<String>,

    /// Answer unknown class selectors with a rejection instead of a numeric password
    #[arg(long)]
    reject_unknown: bool,

    /// Fixed generator seed, for reproducible test runs only
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,
}

fn load_config(args: &Args) -> Result<PassgenConfig, ProtocolError> {
    let mut config = match &args.config {
        Some(path) => PassgenConfig::from_file(path)?,
        None => PassgenConfig::default(),
    };
    config.apply_env()?;

    if let Some(bind) = &args.bind {
        config.server.address = bind.clone();
    }
    if args.reject_unknown {
        config.server.unknown_class = UnknownClassPolicy::Reject;
    }
    if args.seed.is_some() {
        config.generator.seed = args.seed;
    }
    if let Some(level) = &args.log_level {
        config.logging.log_level = Level::from_str(level)
            .map_err(|_| ProtocolError::ConfigError(format!("Invalid log level: {level}")))?;
    }
    if args.json_logs {
        config.logging.json_format = true;
    }
    config.logging.app_name = String::from("passgen-server");
    Ok(config)
}

/// Send on `shutdown` once `signal` fires.
///
/// If the signal cannot be listened for, the sender is held for good so the
/// server keeps serving.
async fn forward_shutdown<F>(signal: F, shutdown: mpsc::Sender<()>)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            tracing::info!("Received CTRL+C signal, shutting down");
            let _ = shutdown.send(()).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Cannot listen for CTRL+C; the server must be stopped another way");
            std::future::pending::<()>().await;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if args.print_config {
        print!("{}", PassgenConfig::example_config());
        return Ok(());
    }

    let config = load_config(&args)?;
    logging::init(&config.logging)?;

    let problems = config.server.validate();
    if !problems.is_empty() {
        for problem in &problems {
            tracing::error!("{problem}");
        }
        return Err(ProtocolError::ConfigError(problems.join("; ")).into());
    }

    let server = Server::bind(&config).await?;
    tracing::info!("Server listening on {}", server.local_addr()?);

    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
    tokio::spawn(forward_shutdown(tokio::signal::ctrl_c(), shutdown_tx));

    server.run_with_shutdown(shutdown_rx).await?;
    Ok(())
}
