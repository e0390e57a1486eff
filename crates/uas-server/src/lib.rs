//! Minimal SIP user agent server
//!
//! Receives SIP requests over UDP, keeps a volatile registrar and call-state
//! table, and answers REGISTER, INVITE and BYE. ACK is consumed silently and
//! every other method is logged and ignored.
//!
//! ```no_run
//! use minisip_uas::{Config, SipServer};
//!
//! # async fn run() -> Result<(), minisip_uas::ServerError> {
//! let server = SipServer::new(&Config::default());
//! server.start().await
//! # }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod server;

pub use config::{Config, RegistrarConfig, ServerConfig};
pub use dispatcher::Dispatcher;
pub use error::{ConfigError, Result, ServerError};
pub use logging::{parse_log_level, setup_logging, LoggingConfig};
pub use server::SipServer;
