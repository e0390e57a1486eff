//! Core SIP types

pub mod headers;
pub mod message;
pub mod method;
pub mod status;
