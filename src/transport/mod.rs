//! # Transport Layer
//!
//! The protocol runs over plain UDP datagrams. Each datagram carries exactly
//! one fixed-size message, so framing is a size check done by the codecs in
//! [`crate::core::codec`].
//!
//! ## Components
//! - **UDP**: socket binding, host resolution and `UdpFramed` construction

pub mod udp;

pub use udp::{bind_client, bind_server, resolve, ClientTransport, ServerTransport};
