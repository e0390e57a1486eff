//! The SIP message type

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;

use crate::types::headers;
use crate::types::method::Method;
use crate::{CRLF, SIP_VERSION};

/// A parsed or synthesized SIP message
///
/// A message is a start line, a header map and a body. Header names are kept
/// exactly as received; a repeated name keeps only its last value. The header
/// map is never absent, only possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    start_line: String,
    headers: HashMap<String, String>,
    body: String,
}

impl Message {
    /// Creates a message with the given start line, no headers and no body
    pub fn new(start_line: impl Into<String>) -> Self {
        Self {
            start_line: start_line.into(),
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    /// Builder-style header setter
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Builder-style body setter
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn start_line(&self) -> &str {
        &self.start_line
    }

    pub fn set_start_line(&mut self, start_line: impl Into<String>) {
        self.start_line = start_line.into();
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Looks up a header by its exact name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Sets a header, replacing any previous value under the same name
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        self.headers.remove(name)
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn call_id(&self) -> Option<&str> {
        self.header(headers::CALL_ID)
    }

    pub fn from_header(&self) -> Option<&str> {
        self.header(headers::FROM)
    }

    /// Registration lifetime in seconds, if an `Expires` header holds a number
    pub fn expires(&self) -> Option<u32> {
        self.header(headers::EXPIRES)
            .and_then(|value| value.parse::<u32>().ok())
    }

    /// Returns true for status lines (`SIP/2.0 <code> <reason>`)
    pub fn is_response(&self) -> bool {
        self.start_line.starts_with(SIP_VERSION)
    }

    /// The request method named by the first token of the start line
    pub fn method(&self) -> Method {
        let token = self.start_line.split(' ').next().unwrap_or_default();
        Method::from(token)
    }

    /// Status code of a response start line
    pub fn status_code(&self) -> Option<u16> {
        if !self.is_response() {
            return None;
        }
        self.start_line
            .split(' ')
            .nth(1)
            .and_then(|code| code.parse().ok())
    }

    /// Writes the message in wire format
    ///
    /// Header order follows the map's iteration order and must not be relied
    /// upon.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(self.to_string())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start_line, CRLF)?;
        for (name, value) in &self.headers {
            write!(f, "{}: {}{}", name, value, CRLF)?;
        }
        f.write_str(CRLF)?;
        f.write_str(&self.body)
    }
}
