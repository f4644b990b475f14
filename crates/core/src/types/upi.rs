//! UPI payment-address identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`UpiId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UpiIdError {
    /// The input string is empty.
    #[error("UPI ID cannot be empty")]
    Empty,
}

/// A UPI payment-address identifier (e.g. `merchant@bank`).
///
/// The payment network owns the real validation rules; this type treats the
/// identifier as an opaque, non-empty string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UpiId(String);

impl UpiId {
    /// Parse a `UpiId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`UpiIdError::Empty`] if the trimmed input is empty.
    pub fn parse(s: &str) -> Result<Self, UpiIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(UpiIdError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `UpiId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UpiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UpiId {
    type Err = UpiIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for UpiId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let upi = UpiId::parse("merchant@icici").unwrap();
        assert_eq!(upi.as_str(), "merchant@icici");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(UpiId::parse(""), Err(UpiIdError::Empty)));
        assert!(matches!(UpiId::parse("   "), Err(UpiIdError::Empty)));
    }

    #[test]
    fn test_parse_trims() {
        let upi = UpiId::parse("  merchant@icici  ").unwrap();
        assert_eq!(upi.as_str(), "merchant@icici");
    }
}
