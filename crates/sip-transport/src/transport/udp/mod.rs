use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tokio::sync::Notify;
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::transport::Transport;

/// Largest UDP payload; receive buffers are sized to it
pub const MAX_DATAGRAM_SIZE: usize = 65535;

/// UDP transport for SIP messages
///
/// Clones share one socket, so a receive loop and any number of handler
/// tasks can use the same transport.
#[derive(Clone)]
pub struct UdpTransport {
    inner: Arc<UdpTransportInner>,
}

struct UdpTransportInner {
    socket: UdpSocket,
    local_addr: SocketAddr,
    closed: AtomicBool,
    shutdown: Notify,
}

impl UdpTransport {
    /// Creates a new UDP transport bound to the specified address
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| Error::BindFailed { addr, source })?;
        let local_addr = socket.local_addr().map_err(Error::LocalAddr)?;
        info!("SIP UDP transport bound to {}", local_addr);

        Ok(Self {
            inner: Arc::new(UdpTransportInner {
                socket,
                local_addr,
                closed: AtomicBool::new(false),
                shutdown: Notify::new(),
            }),
        })
    }

    /// Waits for the next datagram and copies it into `buf`
    ///
    /// A pending receive returns `TransportClosed` as soon as the transport
    /// is closed.
    pub async fn receive(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr)> {
        let shutdown = self.inner.shutdown.notified();
        tokio::pin!(shutdown);
        // Register before checking the flag so a concurrent close is not missed
        shutdown.as_mut().enable();

        if self.is_closed() {
            return Err(Error::TransportClosed);
        }

        let (len, source) = tokio::select! {
            _ = &mut shutdown => return Err(Error::TransportClosed),
            result = self.inner.socket.recv_from(buf) => result.map_err(Error::ReceiveFailed)?,
        };
        trace!("Received {} bytes from {}", len, source);
        Ok((len, source))
    }
}

#[async_trait]
impl Transport for UdpTransport {
    fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.inner.local_addr)
    }

    async fn send_to(&self, bytes: &[u8], destination: SocketAddr) -> Result<()> {
        if self.is_closed() {
            return Err(Error::TransportClosed);
        }

        debug!("Sending {} byte message to {}", bytes.len(), destination);
        self.inner
            .socket
            .send_to(bytes, destination)
            .await
            .map_err(|source| Error::SendFailed {
                destination,
                source,
            })?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.inner.closed.store(true, Ordering::SeqCst);
        self.inner.shutdown.notify_waiters();
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for UdpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UdpTransport({})", self.inner.local_addr)
    }
}
