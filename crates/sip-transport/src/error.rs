//! Transport errors

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The socket could not be bound; the server cannot start
    #[error("failed to bind UDP socket on {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// A single datagram read failed
    #[error("failed to receive datagram: {0}")]
    ReceiveFailed(#[source] io::Error),

    #[error("failed to send datagram to {destination}: {source}")]
    SendFailed {
        destination: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to query local address: {0}")]
    LocalAddr(#[source] io::Error),

    #[error("transport is closed")]
    TransportClosed,
}

impl Error {
    /// True for errors that end the transport rather than a single datagram
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::BindFailed { .. } | Error::TransportClosed)
    }
}
