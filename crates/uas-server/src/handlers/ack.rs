use std::net::SocketAddr;

use tracing::debug;

use minisip_sip_core::Message;

use crate::dispatcher::Dispatcher;

impl Dispatcher {
    /// ACK completes an INVITE exchange; it changes no state and gets no response
    pub fn handle_ack(&self, source: SocketAddr, request: &Message) {
        debug!(
            "ACK received from {}: {}",
            source,
            request.call_id().unwrap_or_default()
        );
    }
}
