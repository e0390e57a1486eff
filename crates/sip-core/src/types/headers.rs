//! Names of the headers the server reads or writes
//!
//! Header names are matched case-sensitively, exactly as received.

pub const VIA: &str = "Via";
pub const FROM: &str = "From";
pub const TO: &str = "To";
pub const CALL_ID: &str = "Call-ID";
pub const CSEQ: &str = "CSeq";
pub const CONTACT: &str = "Contact";
pub const EXPIRES: &str = "Expires";
pub const SERVER: &str = "Server";
pub const DATE: &str = "Date";
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Headers copied verbatim from a request into every response built for it
pub const RESPONSE_COPIED: [&str; 5] = [CALL_ID, FROM, TO, CSEQ, VIA];
