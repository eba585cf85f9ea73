//! The encoded form of a chart.

use std::fmt::{self, Display, Formatter};

/// An immutable, URL-safe share token
///
/// Only ever produced by the encoder, so it is never empty and contains only
/// `[A-Za-z0-9_-]`. Safe to embed unescaped in a URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareToken(String);

impl ShareToken {
    #[inline]
    pub(crate) fn from_encoded(encoded: String) -> Self {
        debug_assert!(!encoded.is_empty());
        debug_assert!(encoded.bytes().all(is_token_byte));
        Self(encoded)
    }

    /// Token text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the token text
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in characters (all ASCII)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the token is empty (never true for encoder output)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Check if a byte belongs to the unpadded base64url alphabet
#[inline]
#[must_use]
pub(crate) fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

impl Display for ShareToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShareToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ShareToken> for String {
    fn from(token: ShareToken) -> Self {
        token.0
    }
}
