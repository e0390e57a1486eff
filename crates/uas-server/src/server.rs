//! Server context and UDP receive loop

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use minisip_registrar_core::{CallTable, Registrar};
use minisip_sip_transport::{Error as TransportError, Transport, UdpTransport, MAX_DATAGRAM_SIZE};

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::Result;

/// One SIP server instance and the state its handlers share
pub struct SipServer {
    config: Config,
    registrar: Registrar,
    calls: CallTable,
}

impl SipServer {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            registrar: Registrar::new(),
            calls: CallTable::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registrar(&self) -> &Registrar {
        &self.registrar
    }

    pub fn calls(&self) -> &CallTable {
        &self.calls
    }

    /// Binds the configured `bind_addr:port`
    pub async fn bind(&self) -> Result<UdpTransport> {
        let addr = self.config.server.socket_addr().await?;
        Ok(UdpTransport::bind(addr).await?)
    }

    /// Binds and serves until the transport is closed
    pub async fn start(&self) -> Result<()> {
        let transport = self.bind().await?;
        self.serve(transport).await
    }

    /// Runs the receive loop on an already bound transport
    ///
    /// Every datagram is handled on its own task and the loop does not wait
    /// for it. A failed read is logged and the loop keeps going; only closing
    /// the transport ends it.
    pub async fn serve(&self, transport: UdpTransport) -> Result<()> {
        let dispatcher = Dispatcher::new(
            Arc::new(transport.clone()),
            self.registrar.clone(),
            self.calls.clone(),
        );
        let _sweeper = self
            .config
            .registrar
            .sweep_interval()
            .map(|period| SweeperGuard(spawn_registration_sweeper(self.registrar.clone(), period)));

        info!("SIP server started on {}", transport.local_addr()?);

        let mut buffer = vec![0u8; MAX_DATAGRAM_SIZE];
        loop {
            match transport.receive(&mut buffer).await {
                Ok((len, source)) => {
                    let data = Bytes::copy_from_slice(&buffer[..len]);
                    let dispatcher = dispatcher.clone();
                    tokio::spawn(async move {
                        dispatcher.handle_message(source, &data).await;
                    });
                }
                Err(TransportError::TransportClosed) => {
                    info!("UDP receive loop terminated");
                    return Ok(());
                }
                Err(e) => {
                    error!("Packet reading error: {}", e);
                }
            }
        }
    }
}

/// Periodically drops registrations whose `Expires` has passed
fn spawn_registration_sweeper(registrar: Registrar, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // the first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = registrar.purge_expired(Utc::now());
            if !purged.is_empty() {
                debug!("Purged {} expired registrations: {:?}", purged.len(), purged);
            }
        }
    })
}

struct SweeperGuard(JoinHandle<()>);

impl Drop for SweeperGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}
