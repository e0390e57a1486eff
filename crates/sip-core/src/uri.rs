//! Address-of-record extraction from name-addr header values

/// Extracts the SIP URI from a `From`/`To` style header value
///
/// The URI starts at the first `sip:`. It ends before the first `>` after
/// that point, or, when the value is not wrapped in angle brackets, before
/// the first `;` so header parameters such as `tag` are not part of the
/// address-of-record. Values without `sip:` yield an empty string.
///
/// ```rust
/// use minisip_sip_core::extract_sip_uri;
///
/// assert_eq!(extract_sip_uri("<sip:bob@example.com>;tag=123"), "sip:bob@example.com");
/// assert_eq!(extract_sip_uri("<tel:+12345678>"), "");
/// ```
pub fn extract_sip_uri(header_value: &str) -> String {
    let Some(start) = header_value.find("sip:") else {
        return String::new();
    };
    let rest = &header_value[start..];

    let end = rest
        .find('>')
        .or_else(|| rest.find(';'))
        .unwrap_or(rest.len());
    rest[..end].to_string()
}
