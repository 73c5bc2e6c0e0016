//! Postal code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PostalCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PostalCodeError {
    /// The input is empty or only whitespace.
    #[error("postal code cannot be empty")]
    Empty,
}

/// A postal code used to pick the shipping zone.
///
/// Surrounding whitespace is trimmed. No format is enforced beyond being
/// non-empty: zone lookup is an exact string match.
///
/// ## Examples
///
/// ```
/// use cartsim_core::PostalCode;
///
/// assert_eq!(PostalCode::parse(" 2000 ").unwrap().as_str(), "2000");
/// assert!(PostalCode::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Parse a `PostalCode` from user input.
    ///
    /// # Errors
    ///
    /// Returns [`PostalCodeError::Empty`] if the trimmed input is empty.
    pub fn parse(s: &str) -> Result<Self, PostalCodeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PostalCodeError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the postal code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = PostalCodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
