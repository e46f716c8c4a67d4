//! Remote identity principal.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Principal`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PrincipalError {
    /// The input string is empty.
    #[error("principal cannot be empty")]
    Empty,
}

/// A cryptographically-authenticated caller principal.
///
/// The principal is issued and verified by the remote identity service;
/// locally it is an opaque token. Its presence means "a remote identity
/// is logged in" - it says nothing about the caller's role, which must
/// be looked up separately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Parse a `Principal` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`PrincipalError::Empty`] if the input is empty.
    pub fn parse(s: &str) -> Result<Self, PrincipalError> {
        if s.is_empty() {
            return Err(PrincipalError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the principal as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Principal {
    type Err = PrincipalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
