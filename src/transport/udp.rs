//! UDP sockets wrapped in [`UdpFramed`].
//!
//! The server binds its configured address; the client binds an ephemeral
//! port of the same address family as the server it talks to.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use tokio::net::{lookup_host, UdpSocket};
use tokio_util::udp::UdpFramed;
use tracing::{debug, info, instrument};

use crate::core::codec::{ClientCodec, ServerCodec};
use crate::error::{ProtocolError, Result};

/// Server socket: yields `(PasswordRequest, peer)` and sinks `(PasswordResponse, peer)`
pub type ServerTransport = UdpFramed<ServerCodec>;

/// Client socket: yields `(PasswordResponse, from)` and sinks `(PasswordRequest, server)`
pub type ClientTransport = UdpFramed<ClientCodec>;

/// Bind the serving socket.
#[instrument]
pub async fn bind_server(address: &str) -> Result<ServerTransport> {
    let socket = UdpSocket::bind(address).await?;
    info!(local_addr = %socket.local_addr()?, "Password server socket bound");
    Ok(UdpFramed::new(socket, ServerCodec::default()))
}

/// Bind an ephemeral client socket able to reach `server`.
pub async fn bind_client(server: SocketAddr) -> Result<ClientTransport> {
    let local: SocketAddr = if server.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };
    let socket = UdpSocket::bind(local).await?;
    debug!(local_addr = %socket.local_addr()?, server = %server, "Client socket bound");
    Ok(UdpFramed::new(socket, ClientCodec::default()))
}

/// Resolve `host:port`, preferring an IPv4 address when the name has both.
#[instrument]
pub async fn resolve(address: &str) -> Result<SocketAddr> {
    let candidates: Vec<SocketAddr> = lookup_host(address)
        .await
        .map_err(|_| ProtocolError::UnresolvedHost(address.to_string()))?
        .collect();

    candidates
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| candidates.first())
        .copied()
        .ok_or_else(|| ProtocolError::UnresolvedHost(address.to_string()))
}
