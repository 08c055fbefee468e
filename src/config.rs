//! # Configuration Management
//!
//! Centralized configuration for the password server and client.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment-specific overrides via `from_env()`
//!
//! ## Security Considerations
//! - Leave `generator.seed` unset outside tests; a fixed seed makes every
//!   password predictable
//! - `server.unknown_class = "reject"` refuses selectors the protocol does not
//!   define instead of quietly generating a numeric password

use crate::core::{DEFAULT_HOST, DEFAULT_PORT};
use crate::error::{ProtocolError, Result};
use crate::password::length::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::password::PasswordLength;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tracing::Level;

/// Main configuration structure that contains all configurable settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PassgenConfig {
    /// Server-specific configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Client-specific configuration
    #[serde(default)]
    pub client: ClientConfig,

    /// Random source configuration
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PassgenConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables, on top of the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from `PASSGEN_*` environment variables.
    ///
    /// Unparsable numeric values are reported rather than ignored.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(addr) = std::env::var("PASSGEN_SERVER_ADDRESS") {
            self.server.address = addr;
        }

        if let Ok(host) = std::env::var("PASSGEN_CLIENT_HOST") {
            self.client.host = host;
        }

        if let Some(port) = env_parse::<u16>("PASSGEN_CLIENT_PORT")? {
            self.client.port = port;
        }

        if let Some(ms) = env_parse::<u64>("PASSGEN_RESPONSE_TIMEOUT_MS")? {
            self.client.response_timeout = Some(Duration::from_millis(ms));
        }

        if let Some(seed) = env_parse::<u64>("PASSGEN_RNG_SEED")? {
            self.generator.seed = Some(seed);
        }

        Ok(())
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.server.validate());
        errors.extend(self.client.validate());
        errors.extend(self.generator.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ProtocolError::ConfigError(format!("Invalid value for {name}: '{raw}'"))),
        Err(_) => Ok(None),
    }
}

/// What the server does with a selector that names no password class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownClassPolicy {
    /// Generate a numeric password, as older servers did
    #[default]
    Numeric,
    /// Answer with a rejection
    Reject,
}

/// Server-specific configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server listen address (e.g., "127.0.0.1:8080")
    pub address: String,

    /// Handling of unrecognized class selectors
    pub unknown_class: UnknownClassPolicy,

    /// Log every answered exchange at info level (peer address, class, length)
    pub log_exchanges: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: format!("{DEFAULT_HOST}:{DEFAULT_PORT}"),
            unknown_class: UnknownClassPolicy::default(),
            log_exchanges: true,
        }
    }
}

impl ServerConfig {
    /// Validate server configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.address.is_empty() {
            errors.push("Server address cannot be empty".to_string());
        } else if self.address.parse::<std::net::SocketAddr>().is_err() {
            errors.push(format!(
                "Invalid server address format: '{}' (expected format: '0.0.0.0:8080')",
                self.address
            ));
        }

        errors
    }
}

/// Client-specific configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server hostname or IP address
    pub host: String,

    /// Server UDP port
    pub port: u16,

    /// Length sent when the user names only a class
    pub default_length: usize,

    /// How long to wait for a response; absent means wait indefinitely
    #[serde(with = "option_duration_serde")]
    pub response_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            default_length: PasswordLength::DEFAULT.get(),
            response_timeout: None,
        }
    }
}

impl ClientConfig {
    /// `host:port` as handed to the resolver
    pub fn server_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Validate client configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.host.trim().is_empty() {
            errors.push("Client host cannot be empty".to_string());
        }

        if self.port == 0 {
            errors.push("Client port must be greater than 0".to_string());
        }

        if PasswordLength::new(self.default_length).is_none() {
            errors.push(format!(
                "Default length {} is outside {}..={}",
                self.default_length, MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            ));
        }

        if let Some(timeout) = self.response_timeout {
            if timeout.as_millis() < 10 {
                errors.push("Response timeout too short (minimum: 10ms)".to_string());
            } else if timeout.as_secs() > 300 {
                errors.push("Response timeout too long (maximum: 300s)".to_string());
            }
        }

        errors
    }
}

/// Random source configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible output; absent means seeded from the OS
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.seed.is_some() {
            errors.push(
                "WARNING: Fixed generator seed - passwords are predictable, not for production"
                    .to_string(),
            );
        }
        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("passgen"),
            log_level: Level::INFO,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

/// Helper module for optional Duration serialization as milliseconds
mod option_duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration
            .map(|d| d.as_millis() as u64)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
