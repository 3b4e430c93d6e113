//! Taiwanese phone number type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Landline (`0[2-8]` + 7 digits) or mobile (`09` + 8 digits).
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[2-8]\d{7}|09\d{8})$").expect("Invalid regex"));

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// Neither a landline nor a mobile number.
    #[error("phone number must be a landline (0[2-8] + 7 digits) or mobile (09 + 8 digits)")]
    InvalidFormat,
}

/// A Taiwanese phone number, digits only.
///
/// ```
/// use pantry_core::Phone;
///
/// assert_eq!(Phone::parse("0912345678").unwrap().as_str(), "0912345678");
/// assert!(Phone::parse("021234567").is_ok());
/// assert!(Phone::parse("0112345678").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or matches neither format.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if !PHONE_RE.is_match(s) {
            return Err(PhoneError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
