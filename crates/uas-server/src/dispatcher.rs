//! Per-datagram request dispatch

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{debug, error, warn};

use minisip_registrar_core::{CallTable, Registrar};
use minisip_sip_core::{parse_message, Message, Method};
use minisip_sip_transport::Transport;

/// Interprets requests against the shared state and answers them
///
/// Cloning is cheap; every handling task gets its own clone.
#[derive(Clone)]
pub struct Dispatcher {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) registrar: Registrar,
    pub(crate) calls: CallTable,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, registrar: Registrar, calls: CallTable) -> Self {
        Self {
            transport,
            registrar,
            calls,
        }
    }

    pub fn registrar(&self) -> &Registrar {
        &self.registrar
    }

    pub fn calls(&self) -> &CallTable {
        &self.calls
    }

    /// Parses one datagram and routes it by method
    ///
    /// Malformed datagrams are logged and dropped without a response.
    pub async fn handle_message(&self, source: SocketAddr, data: &[u8]) {
        debug!("Received message from {}: {}", source, String::from_utf8_lossy(data));

        let message = match parse_message(data) {
            Ok(message) => message,
            Err(e) => {
                warn!("Dropping datagram from {}: {}", source, e);
                return;
            }
        };

        self.dispatch(source, &message).await;
    }

    /// Routes an already parsed message
    pub async fn dispatch(&self, source: SocketAddr, message: &Message) {
        match message.method() {
            Method::Register => self.handle_register(source, message).await,
            Method::Invite => self.handle_invite(source, message).await,
            Method::Bye => self.handle_bye(source, message).await,
            Method::Ack => self.handle_ack(source, message),
            Method::Cancel | Method::Options | Method::Other(_) => {
                warn!("Unhandled message type from {}: {}", source, message.start_line());
            }
        }
    }

    /// Sends a response as a single datagram; failures are logged only
    pub(crate) async fn send_response(&self, destination: SocketAddr, response: &Message) {
        let bytes = response.to_bytes();
        if let Err(e) = self.transport.send_to(&bytes, destination).await {
            error!("Response sending error: {}", e);
        }
    }
}
