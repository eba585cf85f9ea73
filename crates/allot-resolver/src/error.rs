//! Resolver error types

use crate::resolver::SourceKind;
use crate::store::StoreError;
use allot_model::ShareReference;
use thiserror::Error;

/// Why a share segment did not yield a chart
///
/// Each variant maps to a distinct user-facing message; see
/// [`ResolveError::user_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Segment is not a reference and not a decodable token
    #[error("malformed share segment")]
    InvalidToken,

    /// Reference is well-formed but the store holds no such chart
    #[error("no chart with id {0}")]
    NotFound(ShareReference),

    /// Store collaborator failed; retrying later may succeed
    #[error("chart store failed: {0}")]
    Upstream(#[from] StoreError),

    /// Chart was found or decoded but has no activities
    #[error("chart from {0} has no activities")]
    EmptyChart(SourceKind),
}

impl ResolveError {
    /// Message suitable for showing to the person who opened the link
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidToken => "This share link is malformed.",
            Self::NotFound(_) => "No chart exists with this ID.",
            Self::Upstream(_) => "Charts are temporarily unavailable. Please try again.",
            Self::EmptyChart(_) => "No activities to display.",
        }
    }

    /// Check if retrying the same segment could succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

impl From<allot_codec::InvalidToken> for ResolveError {
    fn from(_: allot_codec::InvalidToken) -> Self {
        Self::InvalidToken
    }
}
