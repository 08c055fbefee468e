//! # Core Protocol Components
//!
//! Fixed-layout request/response records and the codecs that move them
//! through a datagram transport.
//!
//! ## Components
//! - **Packet**: `PasswordRequest` / `PasswordResponse` and their byte layouts
//! - **Codec**: tokio-util codecs for the client and server directions
//!
//! ## Wire Format
//! ```text
//! Request:  [Selector(1)] [Length text, NUL-terminated, padded (1024)]   = 1025 bytes
//! Response: [Password, NUL-terminated, padded (33)]                      =   33 bytes
//! ```
//!
//! ## Safety
//! - Every datagram must be exactly the fixed size, anything else is malformed
//! - Values that do not fit their buffer (with the terminator) are refused on encode
//! - Bytes after the first NUL are padding and ignored on decode

pub mod codec;
pub mod packet;

/// Capacity of the request's length-text buffer, terminator included
pub const LENGTH_FIELD_SIZE: usize = 1024;

/// Capacity of the response's password buffer, terminator included
pub const PASSWORD_FIELD_SIZE: usize = crate::password::length::MAX_PASSWORD_LENGTH + 1;

/// Exact size of a request datagram
pub const REQUEST_SIZE: usize = 1 + LENGTH_FIELD_SIZE;

/// Exact size of a response datagram
pub const RESPONSE_SIZE: usize = PASSWORD_FIELD_SIZE;

/// Well-known server port
pub const DEFAULT_PORT: u16 = 8080;

/// Loopback address used for local testing
pub const DEFAULT_HOST: &str = "127.0.0.1";
