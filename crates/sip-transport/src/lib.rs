//! SIP transport layer for the minisip user agent server
//!
//! Only UDP is provided: one datagram carries exactly one SIP message, and
//! nothing is retransmitted.

pub mod error;
pub mod transport;


pub use error::{Error, Result};
pub use transport::udp::{UdpTransport, MAX_DATAGRAM_SIZE};
pub use transport::Transport;

/// Bind a UDP transport to the specified address
pub async fn bind_udp(addr: std::net::SocketAddr) -> Result<UdpTransport> {
    UdpTransport::bind(addr).await
}

/// Re-export of common types for easier use
pub mod prelude {
    pub use crate::{bind_udp, Error, Result, Transport, UdpTransport, MAX_DATAGRAM_SIZE};
}
