//! INVITE handling
//!
//! Every INVITE is accepted: 100 Trying, 180 Ringing, then 200 OK, with the
//! call moving to ringing before the final response and to connected after
//! it. The callee is never looked up.

use std::net::SocketAddr;

use tracing::info;

use minisip_registrar_core::CallStatus;
use minisip_sip_core::{create_response, Message, StatusCode};

use crate::dispatcher::Dispatcher;

impl Dispatcher {
    pub async fn handle_invite(&self, source: SocketAddr, request: &Message) {
        let call_id = request.call_id().unwrap_or_default();

        self.send_response(source, &create_response(request, StatusCode::Trying))
            .await;
        self.send_response(source, &create_response(request, StatusCode::Ringing))
            .await;

        self.calls.set_status(call_id, CallStatus::Ringing);

        self.send_response(source, &create_response(request, StatusCode::Ok))
            .await;

        self.calls.set_status(call_id, CallStatus::Connected);
        info!("Call established: {}", call_id);
    }
}
