#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use passgen_protocol::core::codec::ServerCodec;
use passgen_protocol::core::packet::PasswordRequest;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    // Request decoding: any datagram, never a panic
    let direct = PasswordRequest::from_bytes(data);

    let mut buf = BytesMut::from(data);
    let mut codec = ServerCodec::default();
    let framed = codec.decode(&mut buf);
    assert!(buf.is_empty(), "codec must consume the whole datagram");

    // Every datagram, the empty one included, yields exactly one item
    match framed {
        Ok(Some(datagram)) => assert_eq!(direct.is_ok(), datagram.into_message().is_ok()),
        other => panic!("datagram of {} bytes gave {other:?}", data.len()),
    }
    assert!(matches!(codec.decode(&mut buf), Ok(None)));

    // The length text is untrusted; reading it as a length never panics
    if let Ok(request) = direct {
        let _ = request.length();
        let _ = request.class();
    }
});
