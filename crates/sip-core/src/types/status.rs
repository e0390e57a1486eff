//! # SIP Status Codes
//!
//! The subset of RFC 3261 status codes this server emits. Every recognized
//! request is answered with a provisional or success code; arbitrary codes can
//! still be produced with [`crate::create_custom_response`].

use std::fmt;

/// Status codes the server answers with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 100 Trying
    Trying,
    /// 180 Ringing
    Ringing,
    /// 200 OK
    Ok,
}

impl StatusCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Trying => 100,
            StatusCode::Ringing => 180,
            StatusCode::Ok => 200,
        }
    }

    /// Canonical reason phrase for this code
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Trying => "Trying",
            StatusCode::Ringing => "Ringing",
            StatusCode::Ok => "OK",
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            100 => Some(StatusCode::Trying),
            180 => Some(StatusCode::Ringing),
            200 => Some(StatusCode::Ok),
            _ => None,
        }
    }

    /// 1xx
    pub fn is_provisional(&self) -> bool {
        (100..200).contains(&self.as_u16())
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.as_u16())
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
