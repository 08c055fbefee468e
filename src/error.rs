//! # Error Types
//!
//! Error handling for the password request protocol.
//!
//! This module defines every error that can surface while validating a request,
//! encoding or decoding a datagram, or moving it across the transport.
//!
//! ## Error Categories
//! - **Validation**: a class selector or length text that may not be sent
//! - **Wire format**: datagrams of the wrong size, values that overflow a fixed buffer
//! - **Transport**: socket, resolution and timeout failures
//! - **Configuration**: invalid or unreadable settings
//!
//! All errors implement `std::error::Error` for interoperability.
//!
//! ## Example Usage
//! ```rust
//! use passgen_protocol::error::{ProtocolError, Result};
//! use passgen_protocol::password::PasswordLength;
//! use tracing::{error, info};
//!
//! fn requested_length(text: &str) -> Result<PasswordLength> {
//!     Ok(PasswordLength::parse(text)?)
//! }
//!
//! match requested_length("12") {
//!     Ok(len) => info!(length = len.get(), "Length accepted"),
//!     Err(e) => error!(error = %e, "Length rejected"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants shared by log lines and error paths.
pub mod constants {
    pub const ERR_MALFORMED_MESSAGE: &str = "Datagram does not match the fixed message size";
    pub const ERR_REJECTED: &str = "Server rejected the request";
    pub const ERR_TIMEOUT: &str = "No response before the deadline";
    pub const ERR_NON_ASCII_SELECTOR: &str = "class selector must be a single ASCII character";
    pub const ERR_NON_ASCII_PASSWORD: &str = "password must be ASCII";
    pub const ERR_EMBEDDED_NUL: &str = "text field contains a NUL byte";
    pub const ERR_MISMATCHED_RESPONSE: &str = "Reply does not fit the request";
}

/// Reasons a request is refused before it is sent (or, on the serving side,
/// before anything is generated for it).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown password class '{0}' (expected one of n, a, m, s, u)")]
    UnknownClass(char),

    #[error("The quit selector is never sent as a request")]
    QuitSentinel,

    #[error("Password length is empty")]
    EmptyLength,

    #[error("Password length '{0}' is not a decimal number")]
    NonDigitLength(String),

    #[error("Password length '{text}' is outside {min}..={max}")]
    LengthOutOfRange { text: String, min: usize, max: usize },

    #[error("No password class given")]
    EmptyInput,

    #[error("Unexpected argument '{0}' (expected: <class> [length])")]
    UnexpectedArgument(String),
}

// ProtocolError is the primary error type for all protocol operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Transport error: {0}")]
    Io(#[from] io::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Malformed message: expected {expected} bytes, got {actual}")]
    MalformedMessage { expected: usize, actual: usize },

    #[error("Field '{field}' is {len} bytes but only {capacity} fit on the wire")]
    FieldOverflow {
        field: &'static str,
        len: usize,
        capacity: usize,
    },

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(&'static str),

    #[error("Server rejected the request")]
    Rejected,

    #[error("Reply does not fit the request: {0}")]
    MismatchedResponse(String),

    #[error("Timeout occurred")]
    Timeout,

    #[error("Could not resolve host '{0}'")]
    UnresolvedHost(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProtocolError {
    /// Whether this error came from the transport rather than the message content.
    ///
    /// Transport failures end a serving loop; everything else only ends the
    /// current exchange.
    pub fn is_transport(&self) -> bool {
        matches!(self, ProtocolError::Io(_) | ProtocolError::Timeout)
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
