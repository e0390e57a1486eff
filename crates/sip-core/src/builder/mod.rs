//! Response synthesis
//!
//! Responses copy the dialog-identifying headers of the request they answer
//! and always advertise an empty body.

use chrono::Utc;

use crate::types::headers;
use crate::types::message::Message;
use crate::types::status::StatusCode;
use crate::SIP_VERSION;

/// Value of the `Server` header on every response
pub const SERVER_NAME: &str = concat!("minisip/", env!("CARGO_PKG_VERSION"));

/// HTTP-date layout used for the `Date` header
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Creates a response to `request` with the canonical reason phrase
pub fn create_response(request: &Message, status: StatusCode) -> Message {
    create_custom_response(request, status.as_u16(), status.reason_phrase())
}

/// Creates a response to `request` with an arbitrary code and reason phrase
///
/// `Call-ID`, `From`, `To`, `CSeq` and `Via` are copied when the request has
/// them and omitted otherwise. `Content-Length` is always `0`; a caller that
/// attaches a body must correct it.
pub fn create_custom_response(request: &Message, code: u16, reason: &str) -> Message {
    let mut response = Message::new(format!("{} {} {}", SIP_VERSION, code, reason));

    for name in headers::RESPONSE_COPIED {
        if let Some(value) = request.header(name) {
            response.set_header(name, value);
        }
    }

    response.set_header(headers::SERVER, SERVER_NAME);
    response.set_header(headers::DATE, http_date());
    response.set_header(headers::CONTENT_LENGTH, "0");
    response
}

fn http_date() -> String {
    Utc::now().format(HTTP_DATE_FORMAT).to_string()
}
