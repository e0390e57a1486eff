//! REGISTER handling
//!
//! The address-of-record comes from the `From` header and is bound to the
//! transport address the request arrived from. There is no authentication
//! and no rejection path: an unusable `From` binds the empty address-of-record.

use std::net::SocketAddr;

use tracing::info;

use minisip_sip_core::{create_response, extract_sip_uri, Message, StatusCode};

use crate::dispatcher::Dispatcher;

impl Dispatcher {
    pub async fn handle_register(&self, source: SocketAddr, request: &Message) {
        let aor = extract_sip_uri(request.from_header().unwrap_or_default());
        let address = source.to_string();

        self.registrar.register(&aor, address.as_str(), request.expires());
        info!("User registered: {} -> {}", aor, address);

        let response = create_response(request, StatusCode::Ok);
        self.send_response(source, &response).await;
    }
}
