//! Parser for the textual SIP wire format
//!
//! Parsing is lenient: a header line without a colon is skipped rather than
//! rejected, and no header value or `Content-Length` validation takes place.
//! One datagram carries exactly one message, so no reassembly is attempted.

use std::borrow::Cow;

use tracing::trace;

use crate::error::{Error, Result};
use crate::types::message::Message;
use crate::{CRLF, SIP_VERSION};

/// Parses one complete SIP message from raw bytes
///
/// Invalid UTF-8 sequences are replaced before parsing.
pub fn parse_message(data: &[u8]) -> Result<Message> {
    if data.is_empty() {
        return Err(Error::EmptyMessage);
    }

    let text = String::from_utf8_lossy(data);
    let normalized = normalize_line_endings(&text);
    let lines: Vec<&str> = normalized.split(CRLF).collect();

    let start_line = lines[0];
    if !start_line.contains(SIP_VERSION) {
        return Err(Error::invalid_message(format!(
            "missing {} in start line",
            SIP_VERSION
        )));
    }

    let mut message = Message::new(start_line);
    let mut body_start = None;

    for (index, line) in lines.iter().enumerate().skip(1) {
        if line.is_empty() {
            body_start = Some(index + 1);
            break;
        }

        match line.split_once(':') {
            Some((name, value)) => message.set_header(name.trim(), value.trim()),
            None => trace!("Skipping malformed header line: {}", line),
        }
    }

    if let Some(start) = body_start {
        if start < lines.len() {
            message.set_body(lines[start..].join(CRLF));
        }
    }

    Ok(message)
}

/// Coerces bare `\n` and lone `\r` into `\r\n`
///
/// A run of `\r` ending in `\n` (e.g. `\r\r\n`) is a single line break.
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    let needs_rewrite = text
        .char_indices()
        .any(|(i, c)| match c {
            '\n' => i == 0 || text.as_bytes()[i - 1] != b'\r',
            '\r' => text.as_bytes().get(i + 1) != Some(&b'\n'),
            _ => false,
        });
    if !needs_rewrite {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                let mut run = 1;
                while chars.peek() == Some(&'\r') {
                    chars.next();
                    run += 1;
                }
                if chars.peek() == Some(&'\n') {
                    chars.next();
                    out.push_str(CRLF);
                } else {
                    for _ in 0..run {
                        out.push_str(CRLF);
                    }
                }
            }
            '\n' => out.push_str(CRLF),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_cr_run_before_lf() {
        assert_eq!(normalize_line_endings("a\r\r\nb"), "a\r\nb");
        assert_eq!(normalize_line_endings("a\r\rb"), "a\r\n\r\nb");
    }

    #[test]
    fn test_normalize_mixed_endings() {
        assert_eq!(normalize_line_endings("a\nb\rc\r\nd"), "a\r\nb\r\nc\r\nd");
        assert!(matches!(normalize_line_endings("a\r\nb"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_message(b""), Err(Error::EmptyMessage));
    }

    #[test]
    fn test_missing_version() {
        let result = parse_message(b"HELLO world\r\n\r\n");
        assert!(matches!(result, Err(Error::InvalidMessage(_))));
    }

    #[test]
    fn test_no_blank_line_means_no_body() {
        let msg = parse_message(b"BYE sip:bob@example.com SIP/2.0\r\nCall-ID: x\r\nCSeq: 2 BYE").unwrap();
        assert_eq!(msg.call_id(), Some("x"));
        assert_eq!(msg.header("CSeq"), Some("2 BYE"));
        assert_eq!(msg.body(), "");
    }
}
