//! Identifiers at the store boundary
//!
//! Provides [`ShareReference`], the numeric key of a persisted chart, and
//! [`OwnerId`], the opaque identity of whoever persisted it.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Numeric key of a persisted chart
///
/// Allocated by the store at write time and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareReference(u64);

impl ShareReference {
    /// Create a reference from a raw key
    #[inline]
    #[must_use]
    pub const fn new(key: u64) -> Self {
        Self(key)
    }

    /// Raw key
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for ShareReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShareReference {
    type Err = ParseReferenceError;

    /// Accepts only unsigned base-10 digits; no sign, no fraction, no padding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseReferenceError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseReferenceError::NotDecimal);
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| ParseReferenceError::OutOfRange)
    }
}

/// Why a string is not a share reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseReferenceError {
    /// Nothing to parse
    #[error("empty reference")]
    Empty,

    /// Contains something other than ASCII digits
    #[error("reference must contain only decimal digits")]
    NotDecimal,

    /// All digits, but too large for a store key
    #[error("reference out of range")]
    OutOfRange,
}

/// Opaque identity of an authenticated user
///
/// Only its presence matters to the share flow; the value is handed to the
/// store untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Wrap an identity string
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OwnerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_parses_plain_digits() {
        assert_eq!("42".parse::<ShareReference>(), Ok(ShareReference::new(42)));
        assert_eq!("007".parse::<ShareReference>(), Ok(ShareReference::new(7)));
    }

    #[test]
    fn reference_rejects_sign_fraction_and_trailing() {
        assert_eq!("-5".parse::<ShareReference>(), Err(ParseReferenceError::NotDecimal));
        assert_eq!("+5".parse::<ShareReference>(), Err(ParseReferenceError::NotDecimal));
        assert_eq!("1.5".parse::<ShareReference>(), Err(ParseReferenceError::NotDecimal));
        assert_eq!("12abc".parse::<ShareReference>(), Err(ParseReferenceError::NotDecimal));
        assert_eq!(" 12".parse::<ShareReference>(), Err(ParseReferenceError::NotDecimal));
        assert_eq!("".parse::<ShareReference>(), Err(ParseReferenceError::Empty));
    }

    #[test]
    fn reference_overflow_is_out_of_range() {
        assert_eq!(
            "99999999999999999999999".parse::<ShareReference>(),
            Err(ParseReferenceError::OutOfRange)
        );
    }

    #[test]
    fn reference_display_roundtrip() {
        let reference = ShareReference::new(1234);
        assert_eq!(reference.to_string().parse::<ShareReference>(), Ok(reference));
    }
}
