//! SIP message model for the minisip user agent server
//!
//! This crate turns raw datagrams into [`Message`] values, writes them back to
//! wire bytes, and synthesizes responses from a request template.
//!
//! ```rust
//! use minisip_sip_core::prelude::*;
//!
//! let raw = b"REGISTER sip:example.com SIP/2.0\r\n\
//!             From: <sip:alice@example.com>;tag=1\r\n\
//!             Call-ID: abc\r\n\
//!             \r\n";
//! let request = parse_message(raw).unwrap();
//! assert_eq!(request.method(), Method::Register);
//!
//! let response = create_response(&request, StatusCode::Ok);
//! assert_eq!(response.start_line(), "SIP/2.0 200 OK");
//! assert_eq!(response.call_id(), Some("abc"));
//! ```

pub mod builder;
pub mod error;
pub mod parser;
pub mod types;
pub mod uri;

pub use builder::{create_custom_response, create_response, SERVER_NAME};
pub use error::{Error, Result};
pub use parser::parse_message;
pub use types::headers;
pub use types::message::Message;
pub use types::method::Method;
pub use types::status::StatusCode;
pub use uri::extract_sip_uri;

/// Protocol version token every start line must carry
pub const SIP_VERSION: &str = "SIP/2.0";

/// Line separator used on the wire
pub const CRLF: &str = "\r\n";

/// Re-export of common types for easier use
pub mod prelude {
    pub use crate::{
        create_custom_response, create_response, extract_sip_uri, headers, parse_message,
        Error, Message, Method, Result, StatusCode,
    };
}
