//! Transport abstraction

pub mod udp;

use std::net::SocketAddr;

use async_trait::async_trait;

use crate::error::Result;

/// Sends wire bytes to a peer
///
/// Request handlers depend on this trait rather than on a socket, which lets
/// tests record outgoing datagrams instead of putting them on the network.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Address the transport is bound to
    fn local_addr(&self) -> Result<SocketAddr>;

    /// Sends one datagram to `destination`
    async fn send_to(&self, bytes: &[u8], destination: SocketAddr) -> Result<()>;

    /// Stops the transport; later sends fail
    async fn close(&self) -> Result<()>;

    fn is_closed(&self) -> bool;
}
