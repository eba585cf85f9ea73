//! Testing utilities for the allot workspace
//!
//! Shared fixtures and stub stores.

#![allow(missing_docs)]

use allot_model::{Activity, AllocationMode, ChartData, OwnerId, ShareReference};
use allot_resolver::{ChartStore, MemoryChartStore, StoreError, StoredChart};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

const PALETTE: [&str; 6] = [
    "#3498db", "#e74c3c", "#2ecc71", "#f1c40f", "#9b59b6", "#1abc9c",
];

/// Activity with an id and color derived from its name
pub fn activity(name: &str, value: f64) -> Activity {
    let slot = name.bytes().map(usize::from).sum::<usize>() % PALETTE.len();
    Activity::new(name.to_lowercase(), name, value, PALETTE[slot])
}

/// A full 168-hour week
pub fn sample_week() -> Vec<Activity> {
    vec![
        activity("Work", 40.0),
        activity("Sleep", 56.0),
        activity("Exercise", 7.0),
        activity("Eating", 10.0),
        activity("Commute", 5.0),
        activity("Leisure", 50.0),
    ]
}

/// `sample_week` as a chart in hours
pub fn sample_chart() -> ChartData {
    ChartData::new(sample_week(), AllocationMode::Hours)
}

/// Memory store pre-loaded with `sample_chart` under key 1
pub async fn seeded_store() -> MemoryChartStore {
    let store = MemoryChartStore::new();
    store
        .persist(sample_chart(), Some(OwnerId::new("fixture")))
        .await
        .unwrap();
    store
}

/// Store whose backend is always down
#[derive(Debug, Default)]
pub struct UnreachableStore;

#[async_trait]
impl ChartStore for UnreachableStore {
    async fn lookup(&self, _: ShareReference) -> Result<Option<StoredChart>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_owned()))
    }

    async fn persist(
        &self,
        _: ChartData,
        _: Option<OwnerId>,
    ) -> Result<ShareReference, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_owned()))
    }
}

/// Memory store that counts calls
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryChartStore,
    lookups: AtomicUsize,
    persists: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn persists(&self) -> usize {
        self.persists.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChartStore for CountingStore {
    async fn lookup(&self, reference: ShareReference) -> Result<Option<StoredChart>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(reference).await
    }

    async fn persist(
        &self,
        data: ChartData,
        owner: Option<OwnerId>,
    ) -> Result<ShareReference, StoreError> {
        self.persists.fetch_add(1, Ordering::SeqCst);
        self.inner.persist(data, owner).await
    }
}
