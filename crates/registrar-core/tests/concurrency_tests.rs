//! Concurrent access to the shared tables

use minisip_registrar_core::{CallStatus, CallTable, Registrar};
use pretty_assertions::assert_eq;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_registrations_are_not_lost() {
    const N: usize = 500;
    let registrar = Registrar::new();

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let registrar = registrar.clone();
            tokio::spawn(async move {
                registrar.register(
                    &format!("sip:user{}@example.com", i),
                    format!("127.0.0.1:{}", 10000 + i),
                    None,
                );
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(registrar.len(), N);
    for i in 0..N {
        assert_eq!(
            registrar.lookup(&format!("sip:user{}@example.com", i)),
            Some(format!("127.0.0.1:{}", 10000 + i))
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_same_key_registrations_leave_one_entry() {
    let registrar = Registrar::new();

    let handles: Vec<_> = (0..200)
        .map(|i| {
            let registrar = registrar.clone();
            tokio::spawn(async move {
                registrar.register("sip:alice@example.com", format!("127.0.0.1:{}", 20000 + i), None);
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(registrar.len(), 1);
    let address = registrar.lookup("sip:alice@example.com").unwrap();
    assert!(address.starts_with("127.0.0.1:2"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_call_lifecycles() {
    let calls = CallTable::new();

    let handles: Vec<_> = (0..300)
        .map(|i| {
            let calls = calls.clone();
            tokio::spawn(async move {
                let call_id = format!("call-{}", i);
                calls.set_status(&call_id, CallStatus::Ringing);
                calls.set_status(&call_id, CallStatus::Connected);
                if i % 2 == 0 {
                    calls.remove(&call_id);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(calls.len(), 150);
    assert_eq!(calls.status("call-1"), Some(CallStatus::Connected));
    assert_eq!(calls.status("call-2"), None);
}
