use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Maximum number of characters in an alias.
pub const MAX_LENGTH: usize = 64;

/// A validated alias for a shortened URL.
///
/// Aliases are 1-64 characters long and contain only ASCII letters and
/// digits, so they are always safe to use as a single URL path segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alias(String);

impl Alias {
    /// Creates a new `Alias` after validating the input.
    pub fn new(alias: impl Into<String>) -> Result<Self, CoreError> {
        let alias = alias.into();
        Self::validate(&alias)?;
        Ok(Self(alias))
    }

    /// Creates an `Alias` without validation.
    ///
    /// Use this only for values produced by trusted internal sources, such as
    /// a generator drawing from an alphanumeric alphabet.
    pub fn new_unchecked(alias: impl Into<String>) -> Self {
        Self(alias.into())
    }

    /// Returns the alias as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(alias: &str) -> Result<(), CoreError> {
        if alias.is_empty() || alias.len() > MAX_LENGTH {
            return Err(CoreError::InvalidAlias(format!(
                "length must be between 1 and {}, got {}",
                MAX_LENGTH,
                alias.len()
            )));
        }

        if !alias.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidAlias(format!(
                "must contain only ASCII letters and digits: '{}'",
                alias
            )));
        }

        Ok(())
    }
}

impl Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Alias {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Alias> for String {
    fn from(value: Alias) -> Self {
        value.0
    }
}
