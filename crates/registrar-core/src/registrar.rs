//! Address-of-record bindings

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::debug;

/// Where an address-of-record was last seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Transport address (`ip:port`) the REGISTER arrived from
    pub address: String,
    pub registered_at: DateTime<Utc>,
    /// `None` when the REGISTER carried no usable `Expires`
    pub expires_at: Option<DateTime<Utc>>,
}

impl Binding {
    pub fn new(address: impl Into<String>, expires: Option<u32>, now: DateTime<Utc>) -> Self {
        Self {
            address: address.into(),
            registered_at: now,
            expires_at: expires.map(|secs| now + Duration::seconds(i64::from(secs))),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }
}

/// In-memory registrar: address-of-record to last-known transport address
///
/// Cloning yields another handle onto the same table.
#[derive(Debug, Clone, Default)]
pub struct Registrar {
    bindings: Arc<DashMap<String, Binding>>,
}

impl Registrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `aor` to `address`, replacing any previous binding
    pub fn register(&self, aor: &str, address: impl Into<String>, expires: Option<u32>) {
        self.register_at(aor, address, expires, Utc::now());
    }

    pub fn register_at(
        &self,
        aor: &str,
        address: impl Into<String>,
        expires: Option<u32>,
        now: DateTime<Utc>,
    ) {
        let binding = Binding::new(address, expires, now);
        debug!("Binding {} -> {}", aor, binding.address);
        self.bindings.insert(aor.to_string(), binding);
    }

    /// Current transport address for `aor`, skipping expired bindings
    pub fn lookup(&self, aor: &str) -> Option<String> {
        self.lookup_at(aor, Utc::now())
    }

    pub fn lookup_at(&self, aor: &str, now: DateTime<Utc>) -> Option<String> {
        self.bindings
            .get(aor)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.address.clone())
    }

    /// Full binding for `aor`, expired or not
    pub fn binding(&self, aor: &str) -> Option<Binding> {
        self.bindings.get(aor).map(|entry| entry.clone())
    }

    pub fn unregister(&self, aor: &str) -> Option<Binding> {
        self.bindings.remove(aor).map(|(_, binding)| binding)
    }

    /// Removes every binding expired at `now` and returns their addresses-of-record
    pub fn purge_expired(&self, now: DateTime<Utc>) -> Vec<String> {
        let expired: Vec<String> = self
            .bindings
            .iter()
            .filter(|entry| entry.is_expired(now))
            .map(|entry| entry.key().clone())
            .collect();

        // Re-check under the shard lock: a REGISTER may have refreshed it
        expired
            .into_iter()
            .filter(|aor| {
                self.bindings
                    .remove_if(aor, |_, binding| binding.is_expired(now))
                    .is_some()
            })
            .collect()
    }

    pub fn aors(&self) -> Vec<String> {
        self.bindings.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_overwrites() {
        let registrar = Registrar::new();
        registrar.register("sip:alice@example.com", "127.0.0.1:5070", None);
        registrar.register("sip:alice@example.com", "10.0.0.7:5080", None);

        assert_eq!(registrar.len(), 1);
        assert_eq!(
            registrar.lookup("sip:alice@example.com").as_deref(),
            Some("10.0.0.7:5080")
        );
    }

    #[test]
    fn test_empty_aor_is_a_valid_key() {
        let registrar = Registrar::new();
        registrar.register("", "127.0.0.1:1", None);

        assert_eq!(registrar.lookup("").as_deref(), Some("127.0.0.1:1"));
    }

    #[test]
    fn test_without_expires_never_expires() {
        let registrar = Registrar::new();
        let now = Utc::now();
        registrar.register_at("sip:bob@example.com", "127.0.0.1:5060", None, now);

        let far_future = now + Duration::days(3650);
        assert!(registrar.lookup_at("sip:bob@example.com", far_future).is_some());
        assert!(registrar.purge_expired(far_future).is_empty());
    }

    #[test]
    fn test_expired_binding_is_hidden_then_purged() {
        let registrar = Registrar::new();
        let now = Utc::now();
        registrar.register_at("sip:bob@example.com", "127.0.0.1:5060", Some(60), now);
        registrar.register_at("sip:carol@example.com", "127.0.0.1:5061", Some(3600), now);

        let later = now + Duration::seconds(61);
        assert_eq!(registrar.lookup_at("sip:bob@example.com", later), None);
        assert!(registrar.binding("sip:bob@example.com").is_some());

        let purged = registrar.purge_expired(later);
        assert_eq!(purged, vec!["sip:bob@example.com".to_string()]);
        assert_eq!(registrar.len(), 1);
        assert!(registrar.lookup_at("sip:carol@example.com", later).is_some());
    }

    #[test]
    fn test_zero_expires_is_immediately_expired() {
        let now = Utc::now();
        let binding = Binding::new("127.0.0.1:5060", Some(0), now);

        assert!(binding.is_expired(now));
    }

    #[test]
    fn test_unregister() {
        let registrar = Registrar::new();
        registrar.register("sip:alice@example.com", "127.0.0.1:5070", None);

        let removed = registrar.unregister("sip:alice@example.com").unwrap();
        assert_eq!(removed.address, "127.0.0.1:5070");
        assert!(registrar.is_empty());
        assert!(registrar.unregister("sip:alice@example.com").is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let registrar = Registrar::new();
        let handle = registrar.clone();
        handle.register("sip:alice@example.com", "127.0.0.1:5070", None);

        assert_eq!(registrar.aors(), vec!["sip:alice@example.com".to_string()]);
    }
}
