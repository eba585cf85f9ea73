//! Share link publishing
//!
//! Signed-in owners get a short link backed by the store; everyone else gets
//! a self-contained token link. Both land on the same share page because the
//! resolver accepts either segment.

use crate::config::ShareConfig;
use crate::error::ShareError;
use crate::ratelimit::RateLimiter;
use allot_codec::ShareCodec;
use allot_model::{Activity, AllocationMode, ChartData, ChartValidator, OwnerId, ShareReference};
use allot_resolver::ChartStore;
use serde::Serialize;
use std::sync::Arc;

/// Caller key used when the transport did not report an address
pub const LOCAL_CALLER: &str = "127.0.0.1";

/// A request to publish a chart
#[derive(Debug, Clone, PartialEq)]
pub struct ShareRequest {
    /// Activities to share
    pub activities: Vec<Activity>,
    /// How values are measured
    pub mode: AllocationMode,
    /// Signed-in owner; selects the persisted branch
    pub owner: Option<OwnerId>,
    /// Caller address used as the rate-limit key
    pub caller: Option<String>,
}

impl ShareRequest {
    /// Create anonymous request
    #[must_use]
    pub fn new(activities: Vec<Activity>, mode: AllocationMode) -> Self {
        Self {
            activities,
            mode,
            owner: None,
            caller: None,
        }
    }

    /// With owner
    #[inline]
    #[must_use]
    pub fn with_owner(mut self, owner: OwnerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// With caller address
    #[inline]
    #[must_use]
    pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }
}

/// How a link addresses its chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShareKind {
    /// Persisted chart
    Reference {
        /// Store key
        id: ShareReference,
    },
    /// Self-contained token
    Token,
}

/// A published share link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLink {
    /// Full share page address
    pub url: String,
    /// Path segment the resolver accepts
    pub segment: String,
    /// Which branch produced the link
    pub kind: ShareKind,
}

/// Publishes charts as share links
pub struct ShareService {
    config: ShareConfig,
    store: Arc<dyn ChartStore>,
    codec: ShareCodec,
    limiter: Arc<RateLimiter>,
    validator: ChartValidator,
}

impl ShareService {
    /// Create service with a limiter built from `config`
    #[must_use]
    pub fn new(config: ShareConfig, store: Arc<dyn ChartStore>) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit));
        Self {
            config,
            store,
            codec: ShareCodec::new(),
            limiter,
            validator: ChartValidator::new(),
        }
    }

    /// With limiter (shared between services or driven by a manual clock)
    #[inline]
    #[must_use]
    pub fn with_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    /// With codec
    #[inline]
    #[must_use]
    pub fn with_codec(mut self, codec: ShareCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Configuration in effect
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ShareConfig {
        &self.config
    }

    /// Publish a chart
    ///
    /// # Errors
    /// - [`ShareError::RateLimited`] if an owner's caller used its allowance
    /// - [`ShareError::Invalid`] if a persisted chart fails validation
    /// - [`ShareError::TooManyActivities`] past the configured cap
    /// - [`ShareError::Empty`] if a token share has no activities
    /// - [`ShareError::Encode`] or [`ShareError::Store`] on collaborator failure
    pub async fn share(&self, request: ShareRequest) -> Result<ShareLink, ShareError> {
        let ShareRequest {
            activities,
            mode,
            owner,
            caller,
        } = request;

        match owner {
            Some(owner) => {
                let caller = caller.as_deref().unwrap_or(LOCAL_CALLER);
                self.persist(ChartData::new(activities, mode), owner, caller)
                    .await
            }
            None => self.encode(&activities, mode),
        }
    }

    async fn persist(
        &self,
        chart: ChartData,
        owner: OwnerId,
        caller: &str,
    ) -> Result<ShareLink, ShareError> {
        if self.config.rate_limit.enabled {
            self.limiter.acquire(caller)?;
        }
        self.validator.validate(&chart)?;
        self.check_cap(chart.activities.len())?;

        let id = self.store.persist(chart, Some(owner)).await.map_err(|err| {
            tracing::warn!(error = %err, "chart store write failed");
            err
        })?;

        let segment = id.to_string();
        tracing::debug!(%id, "published persisted share");
        Ok(ShareLink {
            url: self.config.share_url(&segment),
            segment,
            kind: ShareKind::Reference { id },
        })
    }

    fn encode(
        &self,
        activities: &[Activity],
        mode: AllocationMode,
    ) -> Result<ShareLink, ShareError> {
        self.check_cap(activities.len())?;
        if activities.is_empty() {
            return Err(ShareError::Empty);
        }

        let token = self.codec.encode(activities, Some(mode))?;
        tracing::debug!(token_len = token.len(), "published token share");
        let segment = token.into_string();
        Ok(ShareLink {
            url: self.config.share_url(&segment),
            segment,
            kind: ShareKind::Token,
        })
    }

    fn check_cap(&self, count: usize) -> Result<(), ShareError> {
        let max = self.config.max_activities;
        if count > max {
            return Err(ShareError::TooManyActivities { count, max });
        }
        Ok(())
    }
}

impl std::fmt::Debug for ShareService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareService")
            .field("config", &self.config)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}
