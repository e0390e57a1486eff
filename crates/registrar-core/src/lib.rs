//! Registrar and call-state storage
//!
//! Both tables are shared by every request-handling task. They are backed by
//! [`dashmap::DashMap`], so each upsert, lookup and removal runs under the
//! lock of the shard that owns the key and no caller needs extra locking.

pub mod calls;
pub mod registrar;

pub use calls::{CallStatus, CallTable};
pub use registrar::{Binding, Registrar};
