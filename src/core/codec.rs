//! Datagram codecs.
//!
//! Used with [`tokio_util::udp::UdpFramed`], which hands each received
//! datagram to the decoder as one buffer. A datagram is either exactly one
//! message or malformed; there is no reassembly. Malformed datagrams are
//! yielded as [`Datagram::Malformed`] rather than as stream errors, so the
//! caller still learns who sent them.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use super::packet::{PasswordRequest, PasswordResponse};
use crate::error::{ProtocolError, Result};

/// One received datagram
#[derive(Debug)]
pub enum Datagram<T> {
    Message(T),
    /// Wrong size or undecodable. The whole datagram was consumed.
    Malformed(ProtocolError),
}

impl<T> Datagram<T> {
    pub fn into_message(self) -> Result<T> {
        match self {
            Datagram::Message(message) => Ok(message),
            Datagram::Malformed(e) => Err(e),
        }
    }
}

/// Per-datagram bookkeeping shared by both codecs.
///
/// `UdpFramed` decodes each datagram once, then calls the decoder again on
/// the emptied buffer before receiving the next one. That second call must
/// yield nothing, while a datagram that really is empty must still come out
/// as malformed.
#[derive(Debug, Default, Clone, Copy)]
struct DatagramState {
    yielded: bool,
}

impl DatagramState {
    fn take<T>(
        &mut self,
        src: &mut BytesMut,
        expected: usize,
        parse: impl FnOnce(&[u8]) -> Result<T>,
    ) -> Option<Datagram<T>> {
        if self.yielded && src.is_empty() {
            self.yielded = false;
            return None;
        }
        self.yielded = true;

        let datagram = src.split();
        if datagram.len() != expected {
            return Some(Datagram::Malformed(ProtocolError::MalformedMessage {
                expected,
                actual: datagram.len(),
            }));
        }
        Some(match parse(&datagram) {
            Ok(message) => Datagram::Message(message),
            Err(e) => Datagram::Malformed(e),
        })
    }
}

/// Server side: decodes requests, encodes responses
#[derive(Debug, Default, Clone, Copy)]
pub struct ServerCodec {
    state: DatagramState,
}

impl Decoder for ServerCodec {
    type Item = Datagram<PasswordRequest>;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        Ok(self
            .state
            .take(src, super::REQUEST_SIZE, PasswordRequest::from_bytes))
    }
}

impl Encoder<PasswordResponse> for ServerCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: PasswordResponse, dst: &mut BytesMut) -> Result<()> {
        let bytes = item.to_bytes()?;
        dst.reserve(bytes.len());
        dst.extend_from_slice(&bytes);
        Ok(())
    }
}

/// Client side: encodes requests, decodes responses
#[derive(Debug, Default, Clone, Copy)]
pub struct ClientCodec {
    state: DatagramState,
}

impl Decoder for ClientCodec {
    type Item = Datagram<PasswordResponse>;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        Ok(self
            .state
            .take(src, super::RESPONSE_SIZE, PasswordResponse::from_bytes))
    }
}

impl Encoder<PasswordRequest> for ClientCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: PasswordRequest, dst: &mut BytesMut) -> Result<()> {
        let bytes = item.to_bytes()?;
        dst.reserve(bytes.len());
        dst.extend_from_slice(&bytes);
        Ok(())
    }
}
