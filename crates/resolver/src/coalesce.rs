use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Serializes work per key so concurrent lookups for the same email share
/// one backend request.
#[derive(Default)]
pub struct KeyedCoalescer {
    inflight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`. Holders should re-check their
    /// cache after acquiring, since the previous holder may have filled it.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut inflight = self.inflight.lock().await;
            Arc::clone(
                inflight
                    .entry(key.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }

    /// Drop idle per-key locks.
    pub async fn prune(&self) {
        let mut inflight = self.inflight.lock().await;
        inflight.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}
