//! Integration tests for the fixed request/response layouts

#![allow(clippy::unwrap_used)]

use bytes::BytesMut;
use passgen_protocol::core::codec::{ClientCodec, Datagram, ServerCodec};
use passgen_protocol::core::packet::{PasswordRequest, PasswordResponse};
use passgen_protocol::core::{LENGTH_FIELD_SIZE, REQUEST_SIZE, RESPONSE_SIZE};
use passgen_protocol::error::ProtocolError;
use tokio_util::codec::{Decoder, Encoder};

#[test]
fn test_sizes() {
    assert_eq!(REQUEST_SIZE, 1025);
    assert_eq!(RESPONSE_SIZE, 33);
}

#[test]
fn test_numeric_request_round_trip() {
    let request = PasswordRequest::new('n', "8");
    let bytes = request.to_bytes().unwrap();
    assert_eq!(PasswordRequest::from_bytes(&bytes).unwrap(), request);
}

#[test]
fn test_short_request_is_malformed() {
    let bytes = PasswordRequest::new('n', "8").to_bytes().unwrap();
    for len in [0, 1, 2, REQUEST_SIZE - 1] {
        match PasswordRequest::from_bytes(&bytes[..len]) {
            Err(ProtocolError::MalformedMessage { expected, actual }) => {
                assert_eq!(expected, REQUEST_SIZE);
                assert_eq!(actual, len);
            }
            other => panic!("expected MalformedMessage, got {other:?}"),
        }
    }
}

#[test]
fn test_long_request_is_malformed() {
    let bytes = vec![b'n'; REQUEST_SIZE + 1];
    assert!(matches!(
        PasswordRequest::from_bytes(&bytes),
        Err(ProtocolError::MalformedMessage { .. })
    ));
}

#[test]
fn test_length_text_must_leave_room_for_terminator() {
    let fits = "1".repeat(LENGTH_FIELD_SIZE - 1);
    assert!(PasswordRequest::new('n', fits).to_bytes().is_ok());

    let too_long = "1".repeat(LENGTH_FIELD_SIZE);
    assert!(matches!(
        PasswordRequest::new('n', too_long).to_bytes(),
        Err(ProtocolError::FieldOverflow { capacity: 1023, .. })
    ));
}

#[test]
fn test_unterminated_length_field_reads_to_end() {
    let mut bytes = [b'7'; REQUEST_SIZE];
    bytes[0] = b's';
    let request = PasswordRequest::from_bytes(&bytes).unwrap();
    assert_eq!(request.length.len(), LENGTH_FIELD_SIZE);
    assert!(request.length().is_err());
}

#[test]
fn test_response_layout() {
    let bytes = PasswordResponse::new("Ab3$Ab3$").to_bytes().unwrap();
    assert_eq!(&bytes[..8], b"Ab3$Ab3$");
    assert!(bytes[8..].iter().all(|&b| b == 0));
    assert_eq!(
        PasswordResponse::from_bytes(&bytes).unwrap().password,
        "Ab3$Ab3$"
    );
}

#[test]
fn test_response_capacity() {
    assert!(PasswordResponse::new("x".repeat(32)).to_bytes().is_ok());
    assert!(matches!(
        PasswordResponse::new("x".repeat(33)).to_bytes(),
        Err(ProtocolError::FieldOverflow { capacity: 32, .. })
    ));
}

#[test]
fn test_empty_response_is_rejection() {
    let bytes = PasswordResponse::rejection().to_bytes().unwrap();
    assert_eq!(bytes, [0u8; RESPONSE_SIZE]);
    assert!(PasswordResponse::from_bytes(&bytes).unwrap().is_rejection());
}

#[test]
fn test_codecs_agree() {
    let mut wire = BytesMut::new();
    let mut client = ClientCodec::default();
    let mut server = ServerCodec::default();

    client
        .encode(PasswordRequest::new('u', "10"), &mut wire)
        .unwrap();
    assert_eq!(wire.len(), REQUEST_SIZE);
    let request = server
        .decode(&mut wire)
        .unwrap()
        .unwrap()
        .into_message()
        .unwrap();
    assert_eq!(request, PasswordRequest::new('u', "10"));
    assert!(wire.is_empty());

    server
        .encode(PasswordResponse::new("abcdefghjk"), &mut wire)
        .unwrap();
    let response = client
        .decode(&mut wire)
        .unwrap()
        .unwrap()
        .into_message()
        .unwrap();
    assert_eq!(response.password, "abcdefghjk");
}

#[test]
fn test_codec_drops_malformed_datagram_entirely() {
    let mut codec = ServerCodec::default();
    let mut wire = BytesMut::from(&b"n8"[..]);
    assert!(matches!(
        codec.decode(&mut wire),
        Ok(Some(Datagram::Malformed(ProtocolError::MalformedMessage {
            actual: 2,
            ..
        })))
    ));
    assert!(wire.is_empty());
    assert!(matches!(codec.decode(&mut wire), Ok(None)));
}

#[test]
fn test_empty_datagram_is_malformed() {
    let mut wire = BytesMut::new();
    assert!(matches!(
        ClientCodec::default().decode(&mut wire),
        Ok(Some(Datagram::Malformed(ProtocolError::MalformedMessage {
            expected: RESPONSE_SIZE,
            actual: 0,
        })))
    ));
}
