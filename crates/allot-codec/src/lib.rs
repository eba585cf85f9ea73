//! Allot Share Codec
//!
//! Reversible mapping between an activity list and a single URL-safe token,
//! so a chart can be shared without any server-side state.
//!
//! # Wire format
//!
//! ```text
//! Activity[] (+ mode) → JSON → zlib (RFC 1950, level 6) → base64url, no padding
//! ```
//!
//! Two structured forms exist:
//!
//! - [`WireRevision::V1`]: a bare JSON array of activities (no mode)
//! - [`WireRevision::V2`]: `{"activities": [...], "mode": "hours" | "percentage"}`
//!
//! Decoding accepts both. A token without a mode decodes as
//! [`AllocationMode::Hours`](allot_model::AllocationMode::Hours).
//!
//! # Example
//!
//! ```rust
//! use allot_codec::ShareCodec;
//! use allot_model::{Activity, AllocationMode};
//!
//! let codec = ShareCodec::new();
//! let activities = vec![Activity::new("1", "Sleep", 56.0, "#3498db")];
//!
//! let token = codec.encode(&activities, Some(AllocationMode::Hours)).unwrap();
//! let decoded = codec.decode(token.as_str()).unwrap();
//! assert_eq!(decoded.chart.activities, activities);
//! ```

#![warn(unreachable_pub)]

mod codec;
mod error;
mod token;
mod wire;

pub use codec::{CodecLimits, Decoded, ShareCodec};
pub use error::{DecodeStage, EncodeError, InvalidToken};
pub use token::ShareToken;
pub use wire::WireRevision;

use allot_model::{Activity, AllocationMode};

/// Encode with default limits
///
/// # Errors
/// See [`ShareCodec::encode`].
pub fn encode(
    activities: &[Activity],
    mode: Option<AllocationMode>,
) -> Result<ShareToken, EncodeError> {
    ShareCodec::new().encode(activities, mode)
}

/// Decode with default limits
///
/// # Errors
/// See [`ShareCodec::decode`].
pub fn decode(token: &str) -> Result<Decoded, InvalidToken> {
    ShareCodec::new().decode(token)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
