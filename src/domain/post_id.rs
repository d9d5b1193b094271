//! Type-safe post identifier.
//!
//! [`PostId`] is a newtype wrapper around the `INTEGER PRIMARY KEY`
//! assigned by the storage layer, so that post identifiers cannot be
//! confused with other integers flowing through handlers.

use std::fmt;
use std::str::FromStr;

/// Identifier of a stored post.
///
/// Assigned by the storage layer on insert and immutable thereafter.
/// Identifiers increase with insertion order, which is what the default
/// newest-first listing relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(i64);

impl PostId {
    /// Creates a `PostId` from a raw row identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw row identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a path segment is not a valid post identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid post id: {0:?}")]
pub struct ParsePostIdError(String);

impl FromStr for PostId {
    type Err = ParsePostIdError;

    /// Accepts plain decimal digits only; signs, whitespace and
    /// out-of-range values are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParsePostIdError(s.to_string()));
        }
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ParsePostIdError(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_digits() {
        let Ok(id) = "42".parse::<PostId>() else {
            panic!("expected valid id");
        };
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn rejects_signs_and_garbage() {
        for raw in ["", "-1", "+1", " 1", "abc", "1.5", "99999999999999999999"] {
            assert!(raw.parse::<PostId>().is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn display_is_plain_integer() {
        assert_eq!(PostId::new(7).to_string(), "7");
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(PostId::new(2) > PostId::new(1));
    }
}
