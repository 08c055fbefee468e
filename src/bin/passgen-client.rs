//! Password client binary.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session against the local server
//! passgen-client
//!
//! # One request against a named host
//! passgen-client --host passwdgen.example.org s 16
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use passgen_protocol::config::PassgenConfig;
use passgen_protocol::protocol::client::{help_text, menu_text};
use passgen_protocol::protocol::{parse_command, Client, Command};
use passgen_protocol::utils::logging;
use passgen_protocol::{PasswordLength, ProtocolError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;

/// Password generation client
#[derive(Parser, Debug)]
#[command(name = "passgen-client")]
#[command(about = "Request passwords from a passgen server")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server host name or address
    #[arg(long)]
    host: Option<String>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Give up waiting for a response after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error); defaults to warn
    /// unless the config file sets one
    #[arg(long)]
    log_level: Option<String>,

    /// One request as `<class> [length]`; without it the client runs interactively
    command: Vec<String>,
}

fn load_config(args: &Args) -> Result<PassgenConfig, ProtocolError> {
    let mut config = match &args.config {
        Some(path) => PassgenConfig::from_file(path)?,
        None => PassgenConfig::default_with_overrides(|c| c.logging.log_level = Level::WARN),
    };
    config.apply_env()?;

    if let Some(host) = &args.host {
        config.client.host = host.clone();
    }
    if let Some(port) = args.port {
        config.client.port = port;
    }
    if let Some(ms) = args.timeout_ms {
        config.client.response_timeout = Some(Duration::from_millis(ms));
    }
    if let Some(level) = &args.log_level {
        config.logging.log_level = Level::from_str(level)
            .map_err(|_| ProtocolError::ConfigError(format!("Invalid log level: {level}")))?;
    }
    config.logging.app_name = String::from("passgen-client");
    Ok(config)
}

/// Run one line of input. `Ok(false)` means the user asked to quit.
async fn handle_line(
    client: &mut Client,
    line: &str,
    default_length: PasswordLength,
) -> Result<bool, ProtocolError> {
    let command = match parse_command(line, default_length) {
        Ok(command) => command,
        Err(e) => {
            println!("Invalid input: {e}");
            return Ok(true);
        }
    };

    match command {
        Command::Quit => return Ok(false),
        Command::Help => print!("{}", help_text()),
        Command::Generate { selector, length } => match client.request(selector, &length).await {
            Ok(password) => println!("Password generated: {password}\n"),
            Err(e) if e.is_transport() => return Err(e),
            Err(e) => println!("{e}\n"),
        },
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args)?;
    logging::init(&config.logging)?;

    let problems = config.client.validate();
    if !problems.is_empty() {
        return Err(ProtocolError::ConfigError(problems.join("; ")).into());
    }

    let default_length = PasswordLength::new(config.client.default_length)
        .unwrap_or(PasswordLength::DEFAULT);
    let mut client = Client::connect(&config.client).await?;

    if !args.command.is_empty() {
        let line = args.command.join(" ");
        return match parse_command(&line, default_length)? {
            Command::Generate { selector, length } => {
                println!("{}", client.request(selector, &length).await?);
                Ok(())
            }
            Command::Help => {
                print!("{}", help_text());
                Ok(())
            }
            Command::Quit => Ok(()),
        };
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}? ", menu_text());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if !handle_line(&mut client, &line, default_length).await? {
            break;
        }
    }
    Ok(())
}
