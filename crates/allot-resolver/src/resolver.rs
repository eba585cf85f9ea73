//! Share segment resolution
//!
//! [`ShareResolver::resolve`] is the single dispatch point used by every
//! consumer of share links. It performs at most one store call and never
//! retries it; dropping the returned future abandons the lookup without
//! leaving partial state.

use crate::error::ResolveError;
use crate::segment::Segment;
use crate::store::ChartStore;
use allot_codec::{ShareCodec, WireRevision};
use allot_model::{Activity, AllocationMode, ChartData, ShareReference};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Which branch produced a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceKind {
    /// Fetched from the store
    Reference {
        /// Store key
        id: ShareReference,
    },
    /// Decoded from a self-contained token
    Token {
        /// Structured form the token was written in
        revision: WireRevision,
    },
}

impl SourceKind {
    /// Check if the chart came from the store
    #[inline]
    #[must_use]
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference { .. })
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference { id } => write!(f, "reference {id}"),
            Self::Token { revision } => write!(f, "{revision} token"),
        }
    }
}

/// Normalized result of resolving a segment
///
/// Built fresh for every call. Never empty: an empty activity list is
/// reported as [`ResolveError::EmptyChart`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedChart {
    /// Activities in their stored or encoded order
    pub activities: Vec<Activity>,
    /// Allocation mode (`hours` when the source carried none)
    pub mode: AllocationMode,
    /// Branch that produced the chart
    pub source_kind: SourceKind,
}

impl ResolvedChart {
    fn from_chart(chart: ChartData, source_kind: SourceKind) -> Result<Self, ResolveError> {
        if chart.is_empty() {
            return Err(ResolveError::EmptyChart(source_kind));
        }
        Ok(Self {
            activities: chart.activities,
            mode: chart.mode,
            source_kind,
        })
    }

    /// Activities and mode as a chart value
    #[must_use]
    pub fn to_chart(&self) -> ChartData {
        ChartData::new(self.activities.clone(), self.mode)
    }
}

/// Resolves share path segments against a store and a codec
#[derive(Clone)]
pub struct ShareResolver {
    store: Arc<dyn ChartStore>,
    codec: ShareCodec,
}

impl ShareResolver {
    /// Create resolver with default codec limits
    #[must_use]
    pub fn new(store: Arc<dyn ChartStore>) -> Self {
        Self {
            store,
            codec: ShareCodec::new(),
        }
    }

    /// With codec
    #[inline]
    #[must_use]
    pub fn with_codec(mut self, codec: ShareCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Codec used for the token branch
    #[inline]
    #[must_use]
    pub fn codec(&self) -> ShareCodec {
        self.codec
    }

    /// Resolve one path segment to a chart
    ///
    /// # Errors
    /// - [`ResolveError::InvalidToken`] if a token segment does not decode
    /// - [`ResolveError::NotFound`] if the store has no such reference
    /// - [`ResolveError::Upstream`] if the store failed
    /// - [`ResolveError::EmptyChart`] if the chart has no activities
    pub async fn resolve(&self, segment: &str) -> Result<ResolvedChart, ResolveError> {
        match Segment::classify(segment) {
            Segment::Reference(id) => self.resolve_reference(id).await,
            Segment::Token(token) => self.resolve_token(token),
        }
    }

    async fn resolve_reference(&self, id: ShareReference) -> Result<ResolvedChart, ResolveError> {
        let record = match self.store.lookup(id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!(%id, "no stored chart");
                return Err(ResolveError::NotFound(id));
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "chart store lookup failed");
                return Err(ResolveError::Upstream(err));
            }
        };
        ResolvedChart::from_chart(record.data, SourceKind::Reference { id })
    }

    fn resolve_token(&self, token: &str) -> Result<ResolvedChart, ResolveError> {
        let decoded = self.codec.decode(token)?;
        ResolvedChart::from_chart(
            decoded.chart,
            SourceKind::Token {
                revision: decoded.revision,
            },
        )
    }
}

impl fmt::Debug for ShareResolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareResolver")
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}
