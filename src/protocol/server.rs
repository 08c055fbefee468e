//! Serving loop.
//!
//! `Listening -> Decoding -> Generating -> Responding -> Listening`, one
//! datagram at a time. Malformed datagrams are dropped without a reply;
//! transport failures end the loop.

use std::net::SocketAddr;
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use super::exchange::{serve_request, ServeOutcome};
use crate::config::{PassgenConfig, UnknownClassPolicy};
use crate::core::codec::Datagram;
use crate::core::packet::PasswordRequest;
use crate::core::{REQUEST_SIZE, RESPONSE_SIZE};
use crate::error::{constants, Result};
use crate::password::rng::std_rng;
use crate::password::PasswordGenerator;
use crate::transport::udp::{bind_server, ServerTransport};
use crate::utils::Metrics;

/// Password server bound to one UDP socket
pub struct Server {
    transport: ServerTransport,
    generator: PasswordGenerator<StdRng>,
    unknown_class: UnknownClassPolicy,
    log_exchanges: bool,
    metrics: Arc<Metrics>,
}

impl Server {
    /// Bind `config.server.address` and seed the generator from `config.generator`.
    pub async fn bind(config: &PassgenConfig) -> Result<Self> {
        let transport = bind_server(&config.server.address).await?;
        if config.generator.seed.is_some() {
            warn!("Generator seeded from configuration; passwords are reproducible");
        }
        Ok(Self {
            transport,
            generator: PasswordGenerator::new(std_rng(config.generator.seed)),
            unknown_class: config.server.unknown_class,
            log_exchanges: config.server.log_exchanges,
            metrics: Arc::new(Metrics::new()),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.transport.get_ref().local_addr()?)
    }

    /// Shared handle to this server's counters
    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Serve until a transport failure.
    pub async fn run(self) -> Result<()> {
        let (_shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        self.run_with_shutdown(shutdown_rx).await
    }

    /// Serve until a message arrives on `shutdown_rx` (or its sender is dropped).
    #[instrument(skip(self, shutdown_rx), fields(local_addr = ?self.transport.get_ref().local_addr().ok()))]
    pub async fn run_with_shutdown(mut self, mut shutdown_rx: mpsc::Receiver<()>) -> Result<()> {
        info!(unknown_class = ?self.unknown_class, "Password server listening");

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down password server");
                    self.metrics.log_summary();
                    return Ok(());
                }

                next = self.transport.next() => {
                    match next {
                        Some(Ok((Datagram::Message(request), peer))) => {
                            self.answer(request, peer).await?
                        }
                        Some(Ok((Datagram::Malformed(e), peer))) => {
                            self.metrics.malformed_datagram();
                            warn!(peer = %peer, error = %e, "{}", constants::ERR_MALFORMED_MESSAGE);
                        }
                        Some(Err(e)) => {
                            self.metrics.transport_error();
                            error!(error = %e, "Receive failed");
                            return Err(e);
                        }
                        None => {
                            info!("Socket closed");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    async fn answer(&mut self, request: PasswordRequest, peer: SocketAddr) -> Result<()> {
        self.metrics.request_received(REQUEST_SIZE as u64);
        debug!(
            peer = %peer,
            selector = %request.selector.escape_default(),
            length = %request.length.escape_default(),
            "Request received"
        );

        let outcome = serve_request(&mut self.generator, self.unknown_class, &request);
        match &outcome {
            ServeOutcome::Generated {
                class,
                length,
                fallback,
                ..
            } => {
                if *fallback {
                    warn!(
                        peer = %peer,
                        selector = %request.selector.escape_default(),
                        "Unknown class selector, generating numeric password"
                    );
                }
                if self.log_exchanges {
                    info!(peer = %peer, class = %class, length = length.get(), "Password generated");
                }
            }
            ServeOutcome::Rejected(reason) => {
                warn!(peer = %peer, reason = %reason, "Request rejected");
            }
        }

        if let Err(e) = self.transport.send((outcome.response(), peer)).await {
            self.metrics.transport_error();
            error!(error = %e, peer = %peer, "Send failed");
            return Err(e);
        }

        match outcome {
            ServeOutcome::Generated { class, .. } => {
                self.metrics.response_sent(class, RESPONSE_SIZE as u64)
            }
            ServeOutcome::Rejected(_) => self.metrics.request_rejected(RESPONSE_SIZE as u64),
        }
        Ok(())
    }
}
