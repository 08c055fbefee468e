//! # passgen-protocol
//!
//! A password generation service over UDP. A client sends a one-character
//! class selector and a decimal length; the server answers with a freshly
//! generated password of that class and length.
//!
//! ## Modules
//! - **password**: classes, alphabets, length bounds, validation, generation
//! - **core**: the fixed-size request/response records and their codecs
//! - **protocol**: client and server sides of the exchange
//! - **transport**: UDP sockets
//! - **config**: TOML/env configuration
//! - **utils**: logging setup, metrics, deadlines
//!
//! ## Example
//! ```no_run
//! use passgen_protocol::config::PassgenConfig;
//! use passgen_protocol::protocol::Client;
//!
//! # async fn demo() -> passgen_protocol::error::Result<()> {
//! let config = PassgenConfig::default();
//! let mut client = Client::connect(&config.client).await?;
//! let password = client.request('s', "16").await?;
//! assert_eq!(password.len(), 16);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod password;
pub mod protocol;
pub mod transport;
pub mod utils;

pub use error::{ProtocolError, Result, ValidationError};
pub use password::{PasswordClass, PasswordGenerator, PasswordLength, RandomSource};
