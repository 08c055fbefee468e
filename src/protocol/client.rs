//! Requesting side.
//!
//! [`Client`] validates a request before anything touches the network, sends
//! it, and waits for the single response. [`parse_command`] turns one line of
//! user input into what the interactive front end should do.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tracing::{debug, instrument, warn};

use super::exchange::{prepare_request, verify_response};
use crate::config::ClientConfig;
use crate::core::packet::{PasswordRequest, PasswordResponse};
use crate::core::RESPONSE_SIZE;
use crate::error::{constants, ProtocolError, Result, ValidationError};
use crate::password::charset::{HELP_SELECTOR, QUIT_SELECTOR};
use crate::password::validate::is_quit;
use crate::password::{PasswordClass, PasswordLength};
use crate::transport::udp::{bind_client, resolve, ClientTransport};
use crate::utils::timeout::with_optional_timeout;

/// A client talking to one server
pub struct Client {
    transport: ClientTransport,
    server: SocketAddr,
    response_timeout: Option<Duration>,
}

impl Client {
    /// Resolve the configured server and bind a local socket for it.
    #[instrument(skip(config), fields(server = %config.server_address()))]
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let server = resolve(&config.server_address()).await?;
        Self::with_server(server, config.response_timeout).await
    }

    /// Talk to an already-resolved server address.
    pub async fn with_server(server: SocketAddr, response_timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            transport: bind_client(server).await?,
            server,
            response_timeout,
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.transport.get_ref().local_addr()?)
    }

    /// Request a password.
    ///
    /// Invalid input fails with [`ProtocolError::Validation`] before anything
    /// is sent. An empty reply from the server becomes [`ProtocolError::Rejected`];
    /// a reply of the wrong length or class becomes
    /// [`ProtocolError::MismatchedResponse`].
    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn request(&mut self, selector: char, length: &str) -> Result<String> {
        let request = prepare_request(selector, length)?;
        let response = self.exchange(request.clone()).await?;
        if response.is_rejection() {
            warn!("{}", constants::ERR_REJECTED);
            return Err(ProtocolError::Rejected);
        }
        if let Err(e) = verify_response(&request, &response) {
            warn!(error = %e, "{}", constants::ERR_MISMATCHED_RESPONSE);
            return Err(e);
        }
        Ok(response.password)
    }

    /// Send `request` as is and wait for the reply. No validation is done.
    ///
    /// Datagrams already queued on the socket are discarded before sending.
    /// While waiting, anything not from the server and anything malformed is
    /// skipped; only the deadline ends the wait without a reply.
    pub async fn exchange(&mut self, request: PasswordRequest) -> Result<PasswordResponse> {
        self.discard_pending()?;
        self.transport.send((request, self.server)).await?;

        let server = self.server;
        let transport = &mut self.transport;
        let response = with_optional_timeout(self.response_timeout, async move {
            loop {
                match transport.next().await {
                    Some(Ok((datagram, from))) if from == server => match datagram.into_message() {
                        Ok(response) => return Ok(response),
                        Err(e) => warn!(error = %e, "Skipping malformed reply"),
                    },
                    Some(Ok((_, from))) => {
                        debug!(from = %from, "Ignoring datagram from unexpected address");
                    }
                    Some(Err(e)) => return Err(e),
                    None => {
                        return Err(ProtocolError::Io(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "client socket closed",
                        )))
                    }
                }
            }
        })
        .await;

        if let Err(ProtocolError::Timeout) = &response {
            warn!(timeout = ?self.response_timeout, "{}", constants::ERR_TIMEOUT);
        }
        response
    }

    /// Drop whatever is waiting on the socket, such as a reply that arrived
    /// after an earlier exchange gave up.
    fn discard_pending(&self) -> Result<()> {
        let socket = self.transport.get_ref();
        let mut scratch = [0u8; RESPONSE_SIZE];
        loop {
            match socket.try_recv_from(&mut scratch) {
                Ok((n, from)) => debug!(from = %from, bytes = n, "Discarding stale datagram"),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(()),
                // some platforms queue ICMP errors from earlier sends
                Err(e) if e.kind() == io::ErrorKind::ConnectionReset => {
                    debug!(error = %e, "Discarding queued socket error");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Request a password; values are raw and still to be validated
    Generate { selector: char, length: String },
    Help,
    Quit,
}

/// Parse `<class> [length]`.
///
/// The class is the first non-blank character; anything right after it is
/// the length, so `n8` and `n 8` mean the same. A missing length becomes
/// `default_length`. `h` asks for help and `q` quits whatever follows them.
pub fn parse_command(
    line: &str,
    default_length: PasswordLength,
) -> std::result::Result<Command, ValidationError> {
    let line = line.trim_start();
    let mut chars = line.chars();
    let selector = chars.next().ok_or(ValidationError::EmptyInput)?;

    if selector.eq_ignore_ascii_case(&HELP_SELECTOR) {
        return Ok(Command::Help);
    }
    if is_quit(selector) {
        return Ok(Command::Quit);
    }

    let mut rest = chars.as_str().split_whitespace();
    let length = rest
        .next()
        .map(str::to_string)
        .unwrap_or_else(|| default_length.to_string());
    if let Some(extra) = rest.next() {
        return Err(ValidationError::UnexpectedArgument(extra.to_string()));
    }

    Ok(Command::Generate { selector, length })
}

/// Prompt listing the classes.
pub fn menu_text() -> String {
    let mut text = format!(
        "Enter the password type and length ({} to {}):\n",
        PasswordLength::MIN.get(),
        PasswordLength::MAX.get()
    );
    for class in PasswordClass::ALL {
        text.push_str(&format!("  {}: {}\n", class.selector(), class.describe()));
    }
    text.push_str(&format!("  {HELP_SELECTOR}: help\n  {QUIT_SELECTOR}: quit\n"));
    text
}

/// Longer help, including the characters left out of unambiguous passwords.
pub fn help_text() -> String {
    let mut text = String::from("Password generator help\nCommands:\n");
    text.push_str(&format!("  {HELP_SELECTOR}          show this help\n"));
    for class in PasswordClass::ALL {
        text.push_str(&format!("  {} LENGTH   {}\n", class.selector(), class.describe()));
    }
    text.push_str(&format!("  {QUIT_SELECTOR}          quit\n\n"));
    text.push_str(&format!(
        "LENGTH must be between {} and {}; when omitted it is {}.\n\n",
        PasswordLength::MIN.get(),
        PasswordLength::MAX.get(),
        PasswordLength::DEFAULT.get()
    ));
    text.push_str(
        "Characters excluded from 'u':\n\
         \x20 0 O o   (zero and the letter O)\n\
         \x20 1 l I i (one and the letters l, I)\n\
         \x20 2 Z z   (two and the letter Z)\n\
         \x20 5 S s   (five and the letter S)\n\
         \x20 8 B     (eight and the letter B)\n",
    );
    text
}
