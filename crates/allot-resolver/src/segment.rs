//! Classification of share path segments.

use allot_model::ShareReference;

/// What a share path segment names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A persisted chart, by key
    Reference(ShareReference),
    /// A self-contained share token
    Token(&'a str),
}

impl<'a> Segment<'a> {
    /// Classify a segment
    ///
    /// Total and side-effect free: unsigned base-10 digits that fit a store
    /// key are a reference, every other string (including the empty string,
    /// signed numbers and digit strings too large for a key) is a token.
    #[must_use]
    pub fn classify(segment: &'a str) -> Self {
        match segment.parse::<ShareReference>() {
            Ok(reference) => Self::Reference(reference),
            Err(_) => Self::Token(segment),
        }
    }

    /// Check if the segment is a reference
    #[inline]
    #[must_use]
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }
}
