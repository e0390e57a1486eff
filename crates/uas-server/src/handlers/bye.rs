//! BYE handling
//!
//! A BYE for an unknown or already terminated call is still answered 200 OK.

use std::net::SocketAddr;

use tracing::{debug, info};

use minisip_sip_core::{create_response, Message, StatusCode};

use crate::dispatcher::Dispatcher;

impl Dispatcher {
    pub async fn handle_bye(&self, source: SocketAddr, request: &Message) {
        let call_id = request.call_id().unwrap_or_default();

        match self.calls.remove(call_id) {
            Some(previous) => info!("Call terminated: {} (was {})", call_id, previous),
            None => debug!("BYE for unknown call: {}", call_id),
        }

        let response = create_response(request, StatusCode::Ok);
        self.send_response(source, &response).await;
    }
}
