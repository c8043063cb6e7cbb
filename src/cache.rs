//! Status cache shared between the refresher and the badge server
//!
//! The cache holds an immutable snapshot of every known context. Readers
//! clone the snapshot `Arc` under a read lock and look records up without
//! holding any lock. The single writer assembles the next snapshot off-lock
//! and only takes the write lock to swap the pointer, so a reader either
//! sees the whole previous cycle or the whole next one.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use crate::status::StatusRecord;

pub type Snapshot = Arc<HashMap<String, StatusRecord>>;

#[derive(Debug, Default)]
pub struct StatusCache {
    snapshot: RwLock<Snapshot>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot of all cached records
    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.read().await.clone()
    }

    /// Look up the latest record for a context
    pub async fn get(&self, context: &str) -> Option<StatusRecord> {
        self.snapshot().await.get(context).cloned()
    }

    pub async fn len(&self) -> usize {
        self.snapshot().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshot().await.is_empty()
    }

    /// Apply the records of one successful poll cycle.
    ///
    /// Every context in `records` is inserted or overwritten. With
    /// `purge_stale` the result contains exactly `records`; otherwise
    /// contexts missing from `records` keep their previous value.
    pub async fn apply(&self, records: Vec<StatusRecord>, purge_stale: bool) {
        // single writer: the snapshot cannot change between this read and the swap
        let mut next = if purge_stale {
            HashMap::with_capacity(records.len())
        } else {
            self.snapshot().await.as_ref().clone()
        };

        for record in records {
            tracing::debug!("cache {} -> {}", record.context, record.state);
            next.insert(record.context.clone(), record);
        }

        *self.snapshot.write().await = Arc::new(next);
    }
}
