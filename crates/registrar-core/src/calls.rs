//! Call lifecycle table keyed by Call-ID

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

/// Lifecycle of an accepted INVITE
///
/// Absence from the [`CallTable`] means no active call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallStatus {
    Ringing,
    Connected,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Ringing => "ringing",
            CallStatus::Connected => "connected",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared Call-ID to [`CallStatus`] table
#[derive(Debug, Clone, Default)]
pub struct CallTable {
    calls: Arc<DashMap<String, CallStatus>>,
}

impl CallTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or updates the status of `call_id`, returning the previous one
    pub fn set_status(&self, call_id: &str, status: CallStatus) -> Option<CallStatus> {
        self.calls.insert(call_id.to_string(), status)
    }

    pub fn status(&self, call_id: &str) -> Option<CallStatus> {
        self.calls.get(call_id).map(|entry| *entry)
    }

    pub fn contains(&self, call_id: &str) -> bool {
        self.calls.contains_key(call_id)
    }

    /// Terminates `call_id`; `None` if no such call was active
    pub fn remove(&self, call_id: &str) -> Option<CallStatus> {
        self.calls.remove(call_id).map(|(_, status)| status)
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}
