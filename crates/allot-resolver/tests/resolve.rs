use allot_model::{Activity, AllocationMode, ChartData, OwnerId};
use allot_resolver::{
    ChartStore, MemoryChartStore, ResolveError, ShareReference, ShareResolver, SourceKind,
};
use std::sync::Arc;

fn week() -> Vec<Activity> {
    vec![
        Activity::new("1", "Sleep", 56.0, "#3498db"),
        Activity::new("2", "Work", 45.0, "#e74c3c"),
        Activity::new("3", "Exercise", 5.0, "#2ecc71"),
    ]
}

#[tokio::test]
async fn reference_and_token_resolve_to_the_same_chart() {
    let store = Arc::new(MemoryChartStore::new());
    let id = store
        .persist(
            ChartData::new(week(), AllocationMode::Hours),
            Some(OwnerId::new("owner")),
        )
        .await
        .unwrap();
    let resolver = ShareResolver::new(store);

    let by_reference = resolver.resolve(&id.to_string()).await.unwrap();
    let token = allot_codec::encode(&week(), Some(AllocationMode::Hours)).unwrap();
    let by_token = resolver.resolve(token.as_str()).await.unwrap();

    assert_eq!(by_reference.to_chart(), by_token.to_chart());
    assert!(by_reference.source_kind.is_reference());
    assert!(!by_token.source_kind.is_reference());
}

#[tokio::test]
async fn zero_is_a_reference_that_is_never_allocated() {
    let resolver = ShareResolver::new(Arc::new(MemoryChartStore::new()));
    assert_eq!(
        resolver.resolve("0").await,
        Err(ResolveError::NotFound(ShareReference::new(0)))
    );
}

#[tokio::test]
async fn concurrent_resolution_needs_no_coordination() {
    let store = Arc::new(MemoryChartStore::new());
    for _ in 0..8 {
        store
            .persist(ChartData::new(week(), AllocationMode::Percentage), None)
            .await
            .unwrap();
    }
    let resolver = ShareResolver::new(store);

    let handles: Vec<_> = (1..=8u64)
        .map(|n| {
            let resolver = resolver.clone();
            tokio::spawn(async move { resolver.resolve(&n.to_string()).await })
        })
        .collect();

    for (n, handle) in (1..=8u64).zip(handles) {
        let chart = handle.await.unwrap().unwrap();
        assert_eq!(chart.mode, AllocationMode::Percentage);
        assert_eq!(
            chart.source_kind,
            SourceKind::Reference {
                id: ShareReference::new(n)
            }
        );
    }
}

#[tokio::test]
async fn user_messages_reach_the_caller() {
    let resolver = ShareResolver::new(Arc::new(MemoryChartStore::new()));
    let err = resolver.resolve("%%%").await.unwrap_err();
    assert_eq!(err.user_message(), "This share link is malformed.");
}
