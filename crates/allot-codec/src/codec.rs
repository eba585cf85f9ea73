//! Token encoding and decoding
//!
//! Compression is zlib-wrapped DEFLATE at level 6. The decoder only accepts
//! a single complete zlib stream: corrupt, truncated, over-long, or trailing
//! data are all rejected.

use crate::error::{DecodeStage, EncodeError, InvalidToken};
use crate::token::ShareToken;
use crate::wire::{self, WireRevision};
use allot_model::{Activity, AllocationMode, ChartData};
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use std::io::Write;

/// Compression level, part of the wire format
const COMPRESSION_LEVEL: u32 = 6;

/// Bounds applied to untrusted tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecLimits {
    /// Longest token accepted (and produced), in characters
    pub max_token_len: usize,
    /// Largest structured form a token may inflate to, in bytes
    pub max_inflated_len: usize,
}

impl CodecLimits {
    /// Create default limits
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With max token length
    #[inline]
    #[must_use]
    pub fn with_max_token_len(mut self, max: usize) -> Self {
        self.max_token_len = max;
        self
    }

    /// With max inflated length
    #[inline]
    #[must_use]
    pub fn with_max_inflated_len(mut self, max: usize) -> Self {
        self.max_inflated_len = max;
        self
    }
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_token_len: 16 * 1024,
            max_inflated_len: 256 * 1024,
        }
    }
}

/// A successfully decoded token
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Activities and mode (defaulted to `hours` when the token had none)
    pub chart: ChartData,
    /// Structured form the token was written in
    pub revision: WireRevision,
}

/// Encoder/decoder pair for share tokens
///
/// Stateless apart from its limits; cheap to copy and safe to share
/// between any number of callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShareCodec {
    limits: CodecLimits,
}

impl ShareCodec {
    /// Create codec with default limits
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create codec with explicit limits
    #[inline]
    #[must_use]
    pub fn with_limits(limits: CodecLimits) -> Self {
        Self { limits }
    }

    /// Configured limits
    #[inline]
    #[must_use]
    pub fn limits(&self) -> CodecLimits {
        self.limits
    }

    /// Encode activities into a share token
    ///
    /// `mode: None` writes the legacy [`WireRevision::V1`] form; `Some(mode)`
    /// writes [`WireRevision::V2`].
    ///
    /// # Errors
    /// - [`EncodeError::NonFiniteValue`] if a value cannot survive JSON
    /// - [`EncodeError::TokenTooLong`] if the result would be refused by `decode`
    /// - serialization or compression failures
    pub fn encode(
        &self,
        activities: &[Activity],
        mode: Option<AllocationMode>,
    ) -> Result<ShareToken, EncodeError> {
        if let Some(index) = activities.iter().position(|a| !a.value.is_finite()) {
            return Err(EncodeError::NonFiniteValue { index });
        }

        let json = wire::to_json(activities, mode)?;
        let mut encoder = ZlibEncoder::new(
            Vec::with_capacity((json.len() / 2).max(64)),
            Compression::new(COMPRESSION_LEVEL),
        );
        encoder.write_all(&json)?;
        let compressed = encoder.finish()?;
        let encoded = URL_SAFE_NO_PAD.encode(compressed);

        if encoded.len() > self.limits.max_token_len {
            return Err(EncodeError::TokenTooLong {
                len: encoded.len(),
                max: self.limits.max_token_len,
            });
        }

        tracing::trace!(
            revision = %WireRevision::for_mode(mode),
            activities = activities.len(),
            json_len = json.len(),
            token_len = encoded.len(),
            "encoded share token"
        );
        Ok(ShareToken::from_encoded(encoded))
    }

    /// Decode an untrusted token
    ///
    /// Never panics on malformed input. Every failure is reported as
    /// [`InvalidToken`]; the failing step is logged at debug level.
    ///
    /// # Errors
    /// Returns [`InvalidToken`] if any decode step fails.
    pub fn decode(&self, token: &str) -> Result<Decoded, InvalidToken> {
        self.try_decode(token).map_err(|rejection| {
            tracing::debug!(
                stage = %rejection.stage,
                detail = %rejection.detail,
                token_len = token.len(),
                "share token rejected"
            );
            InvalidToken::at(rejection.stage)
        })
    }

    fn try_decode(&self, token: &str) -> Result<Decoded, Rejection> {
        if token.is_empty() {
            return Err(Rejection::new(DecodeStage::Length, "empty token"));
        }
        if token.len() > self.limits.max_token_len {
            return Err(Rejection::new(
                DecodeStage::Length,
                format!("{} chars exceeds {}", token.len(), self.limits.max_token_len),
            ));
        }

        let compressed = base64url_decode(token)
            .map_err(|e| Rejection::new(DecodeStage::Alphabet, e.to_string()))?;
        let json = inflate(&compressed, self.limits.max_inflated_len)
            .map_err(|detail| Rejection::new(DecodeStage::Inflate, detail))?;
        let value: serde_json::Value = serde_json::from_slice(&json)
            .map_err(|e| Rejection::new(DecodeStage::Parse, e.to_string()))?;
        let (chart, revision) = wire::from_value(value)
            .map_err(|stage| Rejection::new(stage, "structured form does not match"))?;

        Ok(Decoded { chart, revision })
    }
}

struct Rejection {
    stage: DecodeStage,
    detail: String,
}

impl Rejection {
    fn new(stage: DecodeStage, detail: impl Into<String>) -> Self {
        Self {
            stage,
            detail: detail.into(),
        }
    }
}

/// Restore stripped padding, then decode with the URL-safe alphabet
fn base64url_decode(token: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let mut padded = String::with_capacity(token.len() + 3);
    padded.push_str(token);
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    URL_SAFE.decode(padded)
}

/// Inflate one complete zlib stream, refusing output past `max_len`
fn inflate(compressed: &[u8], max_len: usize) -> Result<Vec<u8>, String> {
    let mut inflater = Decompress::new(true);
    let mut out: Vec<u8> =
        Vec::with_capacity(compressed.len().saturating_mul(4).clamp(256, 64 * 1024));
    let limit = max_len.saturating_add(1);

    loop {
        if out.len() > max_len {
            return Err(format!("inflated payload exceeds {max_len} bytes"));
        }
        if out.len() == out.capacity() {
            let grow = out.capacity().max(256).min(limit - out.len());
            out.reserve_exact(grow);
        }

        let consumed = counter(inflater.total_in())?;
        let produced = out.len();
        let input = compressed.get(consumed..).unwrap_or_default();
        // `Finish` with a short output buffer fails permanently on some backends.
        let status = inflater
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|e| e.to_string())?;

        match status {
            Status::StreamEnd => {
                if out.len() > max_len {
                    return Err(format!("inflated payload exceeds {max_len} bytes"));
                }
                if counter(inflater.total_in())? != compressed.len() {
                    return Err("trailing bytes after compressed stream".to_owned());
                }
                return Ok(out);
            }
            Status::Ok | Status::BufError => {
                let stalled =
                    counter(inflater.total_in())? == consumed && out.len() == produced;
                if stalled && out.len() < out.capacity() {
                    return Err("compressed stream is truncated".to_owned());
                }
            }
        }
    }
}

fn counter(total: u64) -> Result<usize, String> {
    usize::try_from(total).map_err(|e| e.to_string())
}
