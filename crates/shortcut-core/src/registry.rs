use crate::alias::Alias;
use crate::error::RegistryError;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, RegistryError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Stores `target_url` under a fresh alias, or under `requested_alias`
    /// when the caller pins one, and returns the alias used.
    async fn shorten(&self, target_url: String, requested_alias: Option<Alias>) -> Result<Alias>;
}

#[async_trait]
pub trait Resolver: Send + Sync + 'static {
    /// Resolves an alias to its target URL.
    async fn resolve(&self, alias: &Alias) -> Result<String>;
}

#[async_trait]
pub trait Remover: Send + Sync + 'static {
    /// Deletes the record stored under an alias.
    async fn remove(&self, alias: &Alias) -> Result<()>;
}
