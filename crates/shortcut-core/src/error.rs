use thiserror::Error;

/// Errors raised while building core values such as [`Alias`](crate::Alias).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid alias: {0}")]
    InvalidAlias(String),
}

/// Outcome kinds of a storage operation other than success.
///
/// `Conflict` and `NotFound` are expected outcomes that callers branch on;
/// every other variant is an infrastructure failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("alias already exists: {0}")]
    Conflict(String),
    #[error("alias not found: {0}")]
    NotFound(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage schema error: {0}")]
    Schema(String),
}

impl StorageError {
    /// Returns `true` if the error reports a uniqueness violation on create.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::Conflict(_))
    }

    /// Returns `true` if no record matched the alias.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

/// Errors surfaced by the alias registry to its callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The caller pinned an alias that is already taken.
    #[error("alias already exists: {0}")]
    AliasConflict(String),
    #[error("alias not found: {0}")]
    NotFound(String),
    /// Every generated candidate collided with an existing alias.
    #[error("no free alias found after {attempts} attempts")]
    OutOfAttempts { attempts: u32 },
    #[error("storage failure: {0}")]
    Store(StorageError),
}

impl From<StorageError> for RegistryError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(alias) => RegistryError::AliasConflict(alias),
            StorageError::NotFound(alias) => RegistryError::NotFound(alias),
            other => RegistryError::Store(other),
        }
    }
}
