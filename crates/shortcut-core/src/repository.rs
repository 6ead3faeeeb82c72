use crate::alias::Alias;
use crate::error::StorageError;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Read access to the alias to URL mapping.
///
/// Services that only resolve aliases (e.g. the redirect handler) depend on
/// this trait alone.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Returns the target URL stored for `alias`.
    ///
    /// Returns `Err(StorageError::NotFound)` if no record matches.
    async fn read(&self, alias: &Alias) -> Result<String>;
}

#[async_trait]
pub trait WriteRepository: Send + Sync + 'static {
    /// Inserts a new record.
    ///
    /// Returns `Err(StorageError::Conflict)` if the alias already exists. The
    /// check and the insert are a single atomic step in the backend.
    async fn create(&self, alias: &Alias, target_url: &str) -> Result<()>;
}

#[async_trait]
pub trait DeleteRepository: Send + Sync + 'static {
    /// Removes the record for `alias`.
    ///
    /// Returns `Err(StorageError::NotFound)` if no record was removed.
    async fn delete(&self, alias: &Alias) -> Result<()>;
}

/// The full storage capability set.
pub trait Repository: ReadRepository + WriteRepository + DeleteRepository {}

impl<T> Repository for T where T: ReadRepository + WriteRepository + DeleteRepository {}

#[async_trait]
impl<R: ReadRepository + ?Sized> ReadRepository for std::sync::Arc<R> {
    async fn read(&self, alias: &Alias) -> Result<String> {
        (**self).read(alias).await
    }
}

#[async_trait]
impl<R: WriteRepository + ?Sized> WriteRepository for std::sync::Arc<R> {
    async fn create(&self, alias: &Alias, target_url: &str) -> Result<()> {
        (**self).create(alias, target_url).await
    }
}

#[async_trait]
impl<R: DeleteRepository + ?Sized> DeleteRepository for std::sync::Arc<R> {
    async fn delete(&self, alias: &Alias) -> Result<()> {
        (**self).delete(alias).await
    }
}
