use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use tokio::sync::RwLock;

/// Handle for one in-flight refresh. Sequence numbers only grow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket<K> {
    pub key: K,
    pub seq: u64,
}

struct Published<T> {
    seq: u64,
    value: Arc<T>,
}

/// Latest published refresh result per key.
///
/// A result is published only if no refresh that started later has already
/// published for the same key, so a slow older refresh never overwrites a
/// fresher one.
pub struct RefreshStore<K, T> {
    next_seq: AtomicU64,
    entries: RwLock<HashMap<K, Published<T>>>,
}

impl<K, T> RefreshStore<K, T>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            next_seq: AtomicU64::new(0),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn begin(&self, key: K) -> RefreshTicket<K> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        RefreshTicket { key, seq }
    }

    /// Publishes `value` for the ticket's key. Returns false when it was stale.
    pub async fn complete(&self, ticket: RefreshTicket<K>, value: T) -> bool {
        let mut entries = self.entries.write().await;

        if let Some(current) = entries.get(&ticket.key) {
            if current.seq > ticket.seq {
                debug!(
                    "[RefreshStore] dropping stale result for {:?} (seq {} < {})",
                    ticket.key, ticket.seq, current.seq
                );
                return false;
            }
        }

        entries.insert(
            ticket.key,
            Published {
                seq: ticket.seq,
                value: Arc::new(value),
            },
        );
        true
    }

    pub async fn latest(&self, key: &K) -> Option<Arc<T>> {
        let entries = self.entries.read().await;
        entries.get(key).map(|published| published.value.clone())
    }

    pub async fn latest_seq(&self, key: &K) -> Option<u64> {
        let entries = self.entries.read().await;
        entries.get(key).map(|published| published.seq)
    }
}

impl<K, T> Default for RefreshStore<K, T>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
