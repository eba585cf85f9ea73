//! Persistent chart store boundary
//!
//! The resolver only ever calls [`ChartStore::lookup`]; the share service
//! calls [`ChartStore::persist`]. Retry policy, connection management and
//! schema live behind the trait.

use allot_model::{ChartData, OwnerId, ShareReference};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A persisted chart record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredChart {
    /// Key allocated at write time
    pub id: ShareReference,
    /// Activities and mode as written
    pub data: ChartData,
    /// Who persisted the chart
    pub owner: Option<OwnerId>,
    /// Write timestamp
    pub created_at: DateTime<Utc>,
}

/// Store collaborator failures
///
/// A missing record is not an error; `lookup` returns `Ok(None)` for it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Backend could not be reached or timed out
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the operation
    #[error("store rejected operation: {0}")]
    Rejected(String),

    /// A record exists but its payload could not be read
    #[error("stored chart {reference} is unreadable: {message}")]
    Corrupt {
        reference: ShareReference,
        message: String,
    },
}

/// Persistent chart storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChartStore: Send + Sync {
    /// Fetch a chart by key
    ///
    /// # Errors
    /// Returns [`StoreError`] only when the store itself failed.
    async fn lookup(&self, reference: ShareReference) -> Result<Option<StoredChart>, StoreError>;

    /// Persist a chart, returning its newly allocated key
    ///
    /// # Errors
    /// Returns [`StoreError`] if the write did not happen.
    async fn persist(
        &self,
        data: ChartData,
        owner: Option<OwnerId>,
    ) -> Result<ShareReference, StoreError>;
}

/// In-process chart store
///
/// Keys are allocated from 1 upward and never reused. Safe for concurrent use.
#[derive(Debug)]
pub struct MemoryChartStore {
    charts: DashMap<ShareReference, StoredChart>,
    next_id: AtomicU64,
}

impl MemoryChartStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            charts: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Restore a store from previously taken records
    ///
    /// New keys continue after the largest restored key.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = StoredChart>) -> Self {
        let store = Self::new();
        for record in records {
            store
                .next_id
                .fetch_max(record.id.get().saturating_add(1), Ordering::Relaxed);
            store.charts.insert(record.id, record);
        }
        store
    }

    /// Snapshot of all records, ordered by key
    #[must_use]
    pub fn records(&self) -> Vec<StoredChart> {
        let mut records: Vec<StoredChart> =
            self.charts.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by_key(|record| record.id);
        records
    }

    /// Number of stored charts
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

impl Default for MemoryChartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChartStore for MemoryChartStore {
    async fn lookup(&self, reference: ShareReference) -> Result<Option<StoredChart>, StoreError> {
        Ok(self.charts.get(&reference).map(|entry| entry.value().clone()))
    }

    async fn persist(
        &self,
        data: ChartData,
        owner: Option<OwnerId>,
    ) -> Result<ShareReference, StoreError> {
        // u64::MAX is never handed out so the counter cannot wrap onto live keys.
        let key = self
            .next_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| next.checked_add(1))
            .map_err(|_| StoreError::Rejected("chart keys exhausted".to_owned()))?;
        let id = ShareReference::new(key);
        let record = StoredChart {
            id,
            data,
            owner,
            created_at: Utc::now(),
        };
        self.charts.insert(id, record);
        tracing::debug!(%id, "chart persisted");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allot_model::{Activity, AllocationMode};
    use std::sync::Arc;

    fn chart() -> ChartData {
        ChartData::new(
            vec![Activity::new("1", "Sleep", 56.0, "#3498db")],
            AllocationMode::Hours,
        )
    }

    #[tokio::test]
    async fn persist_then_lookup() {
        let store = MemoryChartStore::new();
        let id = store
            .persist(chart(), Some(OwnerId::new("user-1")))
            .await
            .unwrap();

        let record = store.lookup(id).await.unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.data, chart());
        assert_eq!(record.owner, Some(OwnerId::new("user-1")));
    }

    #[tokio::test]
    async fn keys_start_at_one_and_increase() {
        let store = MemoryChartStore::new();
        let a = store.persist(chart(), None).await.unwrap();
        let b = store.persist(chart(), None).await.unwrap();
        assert_eq!(a, ShareReference::new(1));
        assert_eq!(b, ShareReference::new(2));
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let store = MemoryChartStore::new();
        assert_eq!(store.lookup(ShareReference::new(42)).await, Ok(None));
    }

    #[tokio::test]
    async fn restored_store_continues_key_sequence() {
        let store = MemoryChartStore::new();
        store.persist(chart(), None).await.unwrap();
        store.persist(chart(), None).await.unwrap();

        let restored = MemoryChartStore::from_records(store.records());
        assert_eq!(restored.len(), 2);
        let next = restored.persist(chart(), None).await.unwrap();
        assert_eq!(next, ShareReference::new(3));
    }

    #[tokio::test]
    async fn restored_max_key_refuses_new_charts() {
        let mut record = StoredChart {
            id: ShareReference::new(u64::MAX),
            data: chart(),
            owner: None,
            created_at: Utc::now(),
        };
        let restored = MemoryChartStore::from_records([record.clone()]);

        assert_eq!(restored.lookup(record.id).await, Ok(Some(record.clone())));
        assert!(matches!(
            restored.persist(chart(), None).await,
            Err(StoreError::Rejected(_))
        ));
        assert_eq!(restored.len(), 1);

        record.id = ShareReference::new(u64::MAX - 2);
        let restored = MemoryChartStore::from_records([record]);
        let last = restored.persist(chart(), None).await.unwrap();
        assert_eq!(last, ShareReference::new(u64::MAX - 1));
        assert!(restored.persist(chart(), None).await.is_err());
    }

    #[tokio::test]
    async fn records_survive_json_snapshot() {
        let store = MemoryChartStore::new();
        store.persist(chart(), Some(OwnerId::new("u"))).await.unwrap();

        let json = serde_json::to_string(&store.records()).unwrap();
        let records: Vec<StoredChart> = serde_json::from_str(&json).unwrap();
        assert_eq!(records, store.records());
    }

    #[tokio::test]
    async fn concurrent_writers_get_distinct_keys() {
        let store = Arc::new(MemoryChartStore::new());
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.persist(chart(), None).await.unwrap() })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);
        assert_eq!(store.len(), 32);
    }
}
