//! # Exchange Orchestration
//!
//! Both ends of the one-request/one-response exchange.
//!
//! ## Components
//! - **Exchange**: validation and generation decisions, free of I/O
//! - **Server**: the serving loop over a UDP socket
//! - **Client**: the requesting side and its input grammar
//!
//! ## Serving Policy
//! - Every decoded request is validated again before anything is generated
//! - Refused requests are answered with an empty password
//! - Datagrams of the wrong size get no answer

pub mod client;
pub mod exchange;
pub mod server;

pub use client::{parse_command, Client, Command};
pub use exchange::{prepare_request, serve_request, verify_response, ServeOutcome};
pub use server::Server;

#[cfg(test)]
mod tests;
