//! Error types for the share codec
//!
//! Encoding failures carry their cause. Decoding failures all collapse into
//! [`InvalidToken`]; the [`DecodeStage`] it carries is diagnostic only.

use std::fmt::{self, Display, Formatter};

/// Errors while producing a token
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// JSON cannot represent NaN or infinity without losing it
    #[error("activity {index} has a non-finite value")]
    NonFiniteValue { index: usize },

    /// Token would be longer than the decoder accepts
    #[error("token of {len} chars exceeds limit of {max}")]
    TokenTooLong { len: usize, max: usize },

    /// JSON serialization failed
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Compressor failed
    #[error("compression failed: {0}")]
    Compress(#[from] std::io::Error),
}

/// Step of the decode pipeline that rejected a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStage {
    /// Token is empty or longer than the configured limit
    Length,
    /// Not valid unpadded base64url
    Alphabet,
    /// Compressed stream is corrupt, truncated, or inflates past the limit
    Inflate,
    /// Inflated bytes are not UTF-8 JSON
    Parse,
    /// Top-level value is neither an activity array nor a chart object
    Shape,
    /// An element is not a well-formed activity, or the mode is unknown
    Element,
}

impl DecodeStage {
    /// Short lowercase name, used as a log field
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Alphabet => "alphabet",
            Self::Inflate => "inflate",
            Self::Parse => "parse",
            Self::Shape => "shape",
            Self::Element => "element",
        }
    }
}

impl Display for DecodeStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The token could not be turned back into a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid share token (rejected at {stage})")]
pub struct InvalidToken {
    stage: DecodeStage,
}

impl InvalidToken {
    #[inline]
    pub(crate) const fn at(stage: DecodeStage) -> Self {
        Self { stage }
    }

    /// Pipeline step that failed
    #[inline]
    #[must_use]
    pub const fn stage(&self) -> DecodeStage {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_token_display_names_stage() {
        let err = InvalidToken::at(DecodeStage::Inflate);
        assert_eq!(err.to_string(), "invalid share token (rejected at inflate)");
        assert_eq!(err.stage(), DecodeStage::Inflate);
    }

    #[test]
    fn encode_error_display() {
        let err = EncodeError::NonFiniteValue { index: 3 };
        assert_eq!(err.to_string(), "activity 3 has a non-finite value");
    }
}
