use allot_core::prelude::*;
use allot_core::{ManualClock, RateLimitConfig, RateLimiter, ShareKind};
use allot_model::{AllocationMode, OwnerId};
use allot_test_utils::{sample_week, seeded_store, CountingStore, UnreachableStore};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn config() -> ShareConfig {
    ShareConfig::new().with_app_url("https://allot.example/")
}

#[tokio::test]
async fn published_links_resolve_to_what_was_shared() {
    let store = Arc::new(CountingStore::new());
    let service = ShareService::new(config(), store.clone());
    let resolver = ShareResolver::new(store.clone());

    let persisted = service
        .share(
            ShareRequest::new(sample_week(), AllocationMode::Hours).with_owner(OwnerId::new("u1")),
        )
        .await
        .unwrap();
    let encoded = service
        .share(ShareRequest::new(sample_week(), AllocationMode::Hours))
        .await
        .unwrap();
    assert_eq!(store.persists(), 1);

    let from_store = resolver.resolve(&persisted.segment).await.unwrap();
    let from_token = resolver.resolve(&encoded.segment).await.unwrap();
    assert_eq!(store.lookups(), 1);

    assert_eq!(from_store.to_chart(), from_token.to_chart());
    assert_eq!(facts_for(&from_store), facts_for(&from_token));
    assert_eq!(
        ChartSummary::from_chart(&from_store).slices,
        ChartSummary::from_chart(&from_token).slices
    );
}

#[tokio::test]
async fn resolution_failures_are_distinguishable() {
    let store = Arc::new(seeded_store().await);
    let resolver = ShareResolver::new(store);

    assert!(resolver.resolve("1").await.is_ok());
    assert!(matches!(
        resolver.resolve("2").await,
        Err(ResolveError::NotFound(_))
    ));
    assert!(matches!(
        resolver.resolve("garbage").await,
        Err(ResolveError::InvalidToken)
    ));

    let down = ShareResolver::new(Arc::new(UnreachableStore));
    let err = down.resolve("1").await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(
        err.user_message(),
        "Charts are temporarily unavailable. Please try again."
    );
}

#[tokio::test]
async fn unreachable_store_fails_persisted_share_only() {
    let service = ShareService::new(config(), Arc::new(UnreachableStore));

    let err = service
        .share(ShareRequest::new(sample_week(), AllocationMode::Hours).with_owner(OwnerId::new("u")))
        .await
        .unwrap_err();
    assert!(matches!(err, ShareError::Store(_)));
    assert!(err.is_retryable());

    let link = service
        .share(ShareRequest::new(sample_week(), AllocationMode::Hours))
        .await
        .unwrap();
    assert_eq!(link.kind, ShareKind::Token);
}

#[tokio::test]
async fn rate_limit_window_reopens_with_time() {
    let clock = Arc::new(ManualClock::new());
    let limit = RateLimitConfig::new()
        .with_max_requests(2)
        .with_window(Duration::from_secs(3600));
    let limiter = Arc::new(RateLimiter::with_clock(limit, clock.clone()));
    let service = ShareService::new(config().with_rate_limit(limit), Arc::new(CountingStore::new()))
        .with_limiter(limiter);
    let request = || {
        ShareRequest::new(sample_week(), AllocationMode::Hours)
            .with_owner(OwnerId::new("u"))
            .with_caller("203.0.113.9")
    };

    service.share(request()).await.unwrap();
    service.share(request()).await.unwrap();
    match service.share(request()).await {
        Err(ShareError::RateLimited(err)) => {
            assert_eq!(err.limit, 2);
            assert_eq!(err.reset_after, Duration::from_secs(3600));
        }
        other => panic!("expected rate limit, got {other:?}"),
    }

    clock.advance(Duration::from_secs(3600));
    let link = service.share(request()).await.unwrap();
    assert_eq!(link.url, "https://allot.example/share/3");
}

#[tokio::test]
async fn metadata_points_at_the_published_segment() {
    let service = ShareService::new(config(), Arc::new(CountingStore::new()));
    let link = service
        .share(ShareRequest::new(sample_week(), AllocationMode::Percentage))
        .await
        .unwrap();

    let meta = ShareMetadata::for_segment(service.config(), &link.segment);
    assert_eq!(meta.open_graph.url, link.url);
    assert!(meta.open_graph.images[0]
        .url
        .starts_with("https://allot.example/api/og?data="));
}
