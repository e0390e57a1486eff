//! Dispatcher behaviour against an in-memory transport

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use minisip_registrar_core::{CallStatus, CallTable, Registrar};
use minisip_sip_core::{parse_message, Message};
use minisip_sip_transport::{Error as TransportError, Result as TransportResult, Transport};
use minisip_uas::Dispatcher;

/// Records every datagram instead of sending it
#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
    fail_sends: bool,
}

impl RecordingTransport {
    fn sent_messages(&self) -> Vec<(Message, SocketAddr)> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(bytes, addr)| (parse_message(bytes).unwrap(), *addr))
            .collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    fn local_addr(&self) -> TransportResult<SocketAddr> {
        Ok("127.0.0.1:5060".parse().unwrap())
    }

    async fn send_to(&self, bytes: &[u8], destination: SocketAddr) -> TransportResult<()> {
        if self.fail_sends {
            return Err(TransportError::TransportClosed);
        }
        self.sent.lock().unwrap().push((bytes.to_vec(), destination));
        Ok(())
    }

    async fn close(&self) -> TransportResult<()> {
        Ok(())
    }

    fn is_closed(&self) -> bool {
        false
    }
}

fn setup() -> (Dispatcher, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let dispatcher = Dispatcher::new(transport.clone(), Registrar::new(), CallTable::new());
    (dispatcher, transport)
}

fn client_addr() -> SocketAddr {
    "127.0.0.1:12345".parse().unwrap()
}

fn request(start_line: &str, call_id: &str, from: &str) -> Message {
    Message::new(start_line)
        .with_header("Via", "SIP/2.0/UDP 127.0.0.1:12345;branch=z9hG4bK123")
        .with_header("From", from)
        .with_header("To", "<sip:bob@example.com>")
        .with_header("Call-ID", call_id)
        .with_header("CSeq", "1 X")
        .with_header("Content-Length", "0")
}

#[tokio::test]
async fn test_register_binds_aor_and_answers_ok() {
    let (dispatcher, transport) = setup();
    let register = request(
        "REGISTER sip:example.com SIP/2.0",
        "register-test-123",
        "<sip:alice@example.com>;tag=1",
    );

    dispatcher.handle_message(client_addr(), &register.to_bytes()).await;

    assert_eq!(
        dispatcher.registrar().lookup("sip:alice@example.com"),
        Some("127.0.0.1:12345".to_string())
    );
    let sent = transport.sent_messages();
    assert_eq!(sent.len(), 1);
    let (response, destination) = &sent[0];
    assert_eq!(response.start_line(), "SIP/2.0 200 OK");
    assert_eq!(response.call_id(), Some("register-test-123"));
    assert_eq!(*destination, client_addr());
}

#[tokio::test]
async fn test_register_records_expires() {
    let (dispatcher, _transport) = setup();
    let register = request("REGISTER sip:example.com SIP/2.0", "r1", "<sip:alice@example.com>")
        .with_header("Expires", "3600");

    dispatcher.dispatch(client_addr(), &register).await;

    let binding = dispatcher.registrar().binding("sip:alice@example.com").unwrap();
    assert!(binding.expires_at.is_some());
}

#[tokio::test]
async fn test_register_without_sip_uri_uses_empty_key() {
    let (dispatcher, transport) = setup();
    let register = request("REGISTER sip:example.com SIP/2.0", "r2", "<tel:+12345678>");

    dispatcher.dispatch(client_addr(), &register).await;

    assert_eq!(dispatcher.registrar().lookup(""), Some("127.0.0.1:12345".to_string()));
    assert_eq!(transport.sent_messages().len(), 1);
}

#[tokio::test]
async fn test_invite_sends_three_responses_in_order() {
    let (dispatcher, transport) = setup();
    let invite = request("INVITE sip:bob@example.com SIP/2.0", "C1", "<sip:alice@example.com>;tag=1");

    dispatcher.handle_message(client_addr(), &invite.to_bytes()).await;

    assert_eq!(dispatcher.calls().status("C1"), Some(CallStatus::Connected));
    let start_lines: Vec<String> = transport
        .sent_messages()
        .iter()
        .map(|(msg, _)| msg.start_line().to_string())
        .collect();
    assert_eq!(
        start_lines,
        vec!["SIP/2.0 100 Trying", "SIP/2.0 180 Ringing", "SIP/2.0 200 OK"]
    );
    for (msg, _) in transport.sent_messages() {
        assert_eq!(msg.call_id(), Some("C1"));
    }
}

#[tokio::test]
async fn test_bye_terminates_call() {
    let (dispatcher, transport) = setup();
    dispatcher.calls().set_status("C2", CallStatus::Connected);
    let bye = request("BYE sip:bob@example.com SIP/2.0", "C2", "<sip:alice@example.com>;tag=1");

    dispatcher.dispatch(client_addr(), &bye).await;

    assert!(!dispatcher.calls().contains("C2"));
    let sent = transport.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0.start_line(), "SIP/2.0 200 OK");
}

#[tokio::test]
async fn test_bye_for_unknown_call_still_answers_ok() {
    let (dispatcher, transport) = setup();
    dispatcher.calls().set_status("other", CallStatus::Connected);
    let bye = request("BYE sip:bob@example.com SIP/2.0", "unknown", "<sip:alice@example.com>");

    dispatcher.dispatch(client_addr(), &bye).await;

    assert_eq!(dispatcher.calls().len(), 1);
    assert!(!dispatcher.calls().contains("unknown"));
    let sent = transport.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0.start_line(), "SIP/2.0 200 OK");
    assert_eq!(sent[0].0.call_id(), Some("unknown"));
}

#[tokio::test]
async fn test_full_call_lifecycle() {
    let (dispatcher, transport) = setup();
    let invite = request("INVITE sip:bob@example.com SIP/2.0", "life", "<sip:alice@example.com>");
    let ack = request("ACK sip:bob@example.com SIP/2.0", "life", "<sip:alice@example.com>");
    let bye = request("BYE sip:bob@example.com SIP/2.0", "life", "<sip:alice@example.com>");

    dispatcher.dispatch(client_addr(), &invite).await;
    dispatcher.dispatch(client_addr(), &ack).await;
    assert_eq!(dispatcher.calls().status("life"), Some(CallStatus::Connected));
    dispatcher.dispatch(client_addr(), &bye).await;

    assert_eq!(dispatcher.calls().status("life"), None);
    assert_eq!(transport.sent_messages().len(), 4);
}

#[tokio::test]
async fn test_ack_gets_no_response() {
    let (dispatcher, transport) = setup();
    let ack = request("ACK sip:bob@example.com SIP/2.0", "C3", "<sip:alice@example.com>");

    dispatcher.dispatch(client_addr(), &ack).await;

    assert!(transport.sent_messages().is_empty());
    assert!(dispatcher.calls().is_empty());
}

#[tokio::test]
async fn test_unhandled_methods_are_ignored() {
    let (dispatcher, transport) = setup();

    for start_line in [
        "CANCEL sip:bob@example.com SIP/2.0",
        "OPTIONS sip:bob@example.com SIP/2.0",
        "SIP/2.0 200 OK",
        "register sip:example.com SIP/2.0",
    ] {
        let msg = request(start_line, "x", "<sip:alice@example.com>");
        dispatcher.dispatch(client_addr(), &msg).await;
    }

    assert!(transport.sent_messages().is_empty());
    assert!(dispatcher.registrar().is_empty());
    assert!(dispatcher.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_datagrams_are_dropped() {
    let (dispatcher, transport) = setup();

    dispatcher.handle_message(client_addr(), b"").await;
    dispatcher
        .handle_message(client_addr(), b"REGISTER sip:example.com HTTP/1.1\r\n\r\n")
        .await;

    assert!(transport.sent_messages().is_empty());
    assert!(dispatcher.registrar().is_empty());
}

#[tokio::test]
async fn test_send_failure_does_not_abort_handling() {
    let transport = Arc::new(RecordingTransport {
        fail_sends: true,
        ..Default::default()
    });
    let dispatcher = Dispatcher::new(transport.clone(), Registrar::new(), CallTable::new());
    let invite = request("INVITE sip:bob@example.com SIP/2.0", "C4", "<sip:alice@example.com>");

    dispatcher.dispatch(client_addr(), &invite).await;

    assert_eq!(dispatcher.calls().status("C4"), Some(CallStatus::Connected));
    assert!(transport.sent_messages().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_registers_lose_no_updates() {
    const N: usize = 200;
    let (dispatcher, transport) = setup();

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                let register = request(
                    "REGISTER sip:example.com SIP/2.0",
                    &format!("reg-{}", i),
                    &format!("<sip:user{}@example.com>;tag={}", i, i),
                );
                let source: SocketAddr = format!("127.0.0.1:{}", 20000 + i).parse().unwrap();
                dispatcher.handle_message(source, &register.to_bytes()).await;
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(dispatcher.registrar().len(), N);
    assert_eq!(
        dispatcher.registrar().lookup("sip:user7@example.com"),
        Some("127.0.0.1:20007".to_string())
    );
    assert_eq!(transport.sent_messages().len(), N);
}
