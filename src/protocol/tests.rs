// test-only module included via protocol/mod.rs
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::sync::mpsc;

use crate::config::{PassgenConfig, UnknownClassPolicy};
use crate::core::packet::{PasswordRequest, PasswordResponse};
use crate::core::RESPONSE_SIZE;
use crate::error::{ProtocolError, ValidationError};
use crate::password::charset::AMBIGUOUS;
use crate::protocol::{Client, Server};

async fn spawn_server(
    unknown_class: UnknownClassPolicy,
) -> (SocketAddr, mpsc::Sender<()>, tokio::task::JoinHandle<crate::error::Result<()>>) {
    let config = PassgenConfig::default_with_overrides(|c| {
        c.server.address = "127.0.0.1:0".into();
        c.server.unknown_class = unknown_class;
    });
    let server = Server::bind(&config).await.expect("bind server");
    let addr = server.local_addr().expect("server address");
    let (tx, rx) = mpsc::channel(1);
    let handle = tokio::spawn(server.run_with_shutdown(rx));
    (addr, tx, handle)
}

#[tokio::test]
async fn test_client_server_flow() {
    let (addr, shutdown, handle) = spawn_server(UnknownClassPolicy::Numeric).await;
    let mut client = Client::with_server(addr, Some(Duration::from_secs(5)))
        .await
        .expect("client bind");

    // =================== Numeric, default length ===================
    let digits = client.request('n', "8").await.expect("numeric password");
    assert_eq!(digits.len(), 8);
    assert!(digits.chars().all(|c| c.is_ascii_digit()));

    // =================== Unambiguous ===================
    let clear = client.request('U', "10").await.expect("unambiguous password");
    assert_eq!(clear.len(), 10);
    assert!(clear.bytes().all(|b| !AMBIGUOUS.contains(&b)));

    // =================== Boundaries ===================
    assert_eq!(client.request('s', "6").await.unwrap().len(), 6);
    assert_eq!(client.request('m', "032").await.unwrap().len(), 32);

    shutdown.send(()).await.unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_invalid_input_never_reaches_the_network() {
    // Nothing listens here; a send would still succeed but no reply could come
    let mut client = Client::with_server("127.0.0.1:9".parse().unwrap(), Some(Duration::from_millis(50)))
        .await
        .unwrap();

    for (selector, length) in [('x', "8"), ('q', "8"), ('n', "5"), ('n', "abc"), ('a', "")] {
        let err = client.request(selector, length).await.unwrap_err();
        assert!(
            matches!(err, ProtocolError::Validation(_)),
            "{selector}/{length:?} gave {err:?}"
        );
    }
}

#[tokio::test]
async fn test_server_rejections_surface_on_client() {
    let (addr, shutdown, handle) = spawn_server(UnknownClassPolicy::Reject).await;
    let mut client = Client::with_server(addr, Some(Duration::from_secs(5)))
        .await
        .unwrap();

    // Bypass client-side checks with raw exchanges
    let refused = client
        .exchange(PasswordRequest::new('x', "8"))
        .await
        .unwrap();
    assert!(refused.is_rejection());

    let oversized = client
        .exchange(PasswordRequest::new('s', "500"))
        .await
        .unwrap();
    assert!(oversized.is_rejection());

    shutdown.send(()).await.unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_response_from_stranger_is_ignored() {
    let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let stranger = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let mut client = Client::with_server(server.local_addr().unwrap(), Some(Duration::from_secs(5)))
        .await
        .unwrap();
    let client_addr = client.local_addr().unwrap();
    let client_addr = SocketAddr::from(([127, 0, 0, 1], client_addr.port()));

    let responder = tokio::spawn(async move {
        let mut buf = [0u8; 2048];
        let (n, _) = server.recv_from(&mut buf).await.unwrap();
        assert_eq!(n, crate::core::REQUEST_SIZE);

        let mut forged = [0u8; RESPONSE_SIZE];
        forged[..6].copy_from_slice(b"forged");
        stranger.send_to(&forged, client_addr).await.unwrap();

        let mut genuine = [0u8; RESPONSE_SIZE];
        genuine[..6].copy_from_slice(b"123456");
        server.send_to(&genuine, client_addr).await.unwrap();
    });

    let password = client.request('n', "6").await.unwrap();
    assert_eq!(password, "123456");
    responder.await.unwrap();
}

/// A socket standing in for the server, plus the client's loopback address.
async fn fake_server(timeout: Duration) -> (UdpSocket, Client, SocketAddr) {
    let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let client = Client::with_server(server.local_addr().unwrap(), Some(timeout))
        .await
        .unwrap();
    let port = client.local_addr().unwrap().port();
    (server, client, SocketAddr::from(([127, 0, 0, 1], port)))
}

fn response_bytes(password: &str) -> [u8; RESPONSE_SIZE] {
    PasswordResponse::new(password).to_bytes().unwrap()
}

#[tokio::test]
async fn test_junk_datagrams_do_not_end_the_wait() {
    let (server, mut client, client_addr) = fake_server(Duration::from_secs(5)).await;
    let stranger = UdpSocket::bind("127.0.0.1:0").await.unwrap();

    let responder = tokio::spawn(async move {
        let mut buf = [0u8; 2048];
        server.recv_from(&mut buf).await.unwrap();

        // A one-byte datagram from a stranger, then one from the server itself
        stranger.send_to(b"x", client_addr).await.unwrap();
        server.send_to(b"x", client_addr).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        server
            .send_to(&response_bytes("abcdefghijklmnopqrst"), client_addr)
            .await
            .unwrap();
    });

    let password = client.request('a', "20").await.unwrap();
    assert_eq!(password, "abcdefghijklmnopqrst");
    responder.await.unwrap();
}

#[tokio::test]
async fn test_reply_must_match_the_request() {
    let (server, mut client, client_addr) = fake_server(Duration::from_secs(5)).await;

    let responder = tokio::spawn(async move {
        let mut buf = [0u8; 2048];
        for reply in ["123456", "abcdefghij0123456789"] {
            server.recv_from(&mut buf).await.unwrap();
            server.send_to(&response_bytes(reply), client_addr).await.unwrap();
        }
    });

    // Wrong length for an alpha/20 request
    let err = client.request('a', "20").await.unwrap_err();
    assert!(matches!(err, ProtocolError::MismatchedResponse(_)), "{err:?}");
    assert!(!err.is_transport());

    // Right length, digits in an alpha password
    let err = client.request('a', "20").await.unwrap_err();
    assert!(matches!(err, ProtocolError::MismatchedResponse(_)), "{err:?}");
    responder.await.unwrap();
}

#[tokio::test]
async fn test_late_reply_is_not_taken_for_the_next_answer() {
    let (server, mut client, client_addr) = fake_server(Duration::from_millis(100)).await;

    let mut buf = [0u8; 2048];
    let first = client.request('n', "6");
    let (sent, err) = tokio::join!(server.recv_from(&mut buf), first);
    sent.unwrap();
    assert!(matches!(err, Err(ProtocolError::Timeout)));

    // The answer to the first request arrives after the client gave up
    server.send_to(&response_bytes("111111"), client_addr).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let responder = tokio::spawn(async move {
        let mut buf = [0u8; 2048];
        server.recv_from(&mut buf).await.unwrap();
        server.send_to(&response_bytes("222222"), client_addr).await.unwrap();
    });

    let password = client.request('n', "6").await.unwrap();
    assert_eq!(password, "222222");
    responder.await.unwrap();
}

#[tokio::test]
async fn test_timeout_without_server() {
    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let mut client = Client::with_server(silent.local_addr().unwrap(), Some(Duration::from_millis(100)))
        .await
        .unwrap();

    let err = client.request('a', "8").await.unwrap_err();
    assert!(matches!(err, ProtocolError::Timeout));
    assert!(err.is_transport());
}

#[test]
fn test_quit_is_a_validation_error() {
    let err = crate::protocol::prepare_request('Q', "8").unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::Validation(ValidationError::QuitSentinel)
    ));
}
