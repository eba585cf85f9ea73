//! Share publishing errors

use crate::ratelimit::RateLimitError;
use allot_codec::EncodeError;
use allot_model::ValidationError;
use allot_resolver::StoreError;

/// Why a share link could not be produced
///
/// None of these leave partial state behind: a failed share never writes to
/// the store and never changes the chart being shared.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    /// Caller used its allowance for persisted shares
    #[error(transparent)]
    RateLimited(#[from] RateLimitError),

    /// Chart failed validation
    #[error("invalid chart: {0}")]
    Invalid(#[from] ValidationError),

    /// Chart carries more activities than allowed
    #[error("too many activities: {count} (max {max})")]
    TooManyActivities { count: usize, max: usize },

    /// Nothing to share
    #[error("no activities to share")]
    Empty,

    /// Encoder could not produce a token
    #[error("could not encode chart: {0}")]
    Encode(#[from] EncodeError),

    /// Store refused or failed the write
    #[error("could not save chart: {0}")]
    Store(#[from] StoreError),
}

impl ShareError {
    /// Check if retrying the same request later could succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_) | Self::Store(StoreError::Unavailable(_))
        )
    }

    /// Check if the request itself was at fault
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Invalid(_) | Self::TooManyActivities { .. } | Self::Empty
        )
    }
}
