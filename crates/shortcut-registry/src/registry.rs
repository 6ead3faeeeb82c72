use crate::policy::RegistryPolicy;
use async_trait::async_trait;
use shortcut_core::repository::Result as StorageResult;
use shortcut_core::{
    Alias, DeleteRepository, ReadRepository, RegistryError, Remover, Resolver, Shortener,
    StorageError, WriteRepository,
};
use shortcut_generator::Generator;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Orchestrates a [`Generator`] and a storage backend.
///
/// The registry is stateless between calls: it holds no cache and every
/// operation is a fresh round trip to the store. Uniqueness is left to the
/// store; the registry only reacts to [`StorageError::Conflict`] by drawing
/// another candidate, up to [`RegistryPolicy::max_attempts`] times.
///
/// Each capability trait is implemented with the narrowest storage bound it
/// needs, so a read-only backend is enough to serve [`Resolver`].
#[derive(Debug)]
pub struct AliasRegistry<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    policy: RegistryPolicy,
}

impl<R, G> Clone for AliasRegistry<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            policy: self.policy,
        }
    }
}

impl<R, G> AliasRegistry<R, G> {
    /// Creates a registry with the default policy.
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_policy(repository, generator, RegistryPolicy::default())
    }

    pub fn with_policy(repository: R, generator: G, policy: RegistryPolicy) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            policy,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Runs one store call under the policy's deadline.
    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> StorageResult<T>
    where
        F: Future<Output = StorageResult<T>>,
    {
        let Some(limit) = self.policy.store_timeout else {
            return call.await;
        };

        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout(format!(
                "{operation} did not complete within {limit:?}"
            ))),
        }
    }
}

#[async_trait]
impl<R: WriteRepository, G: Generator> Shortener for AliasRegistry<R, G> {
    async fn shorten(
        &self,
        target_url: String,
        requested_alias: Option<Alias>,
    ) -> Result<Alias, RegistryError> {
        if let Some(alias) = requested_alias {
            // A pinned alias gets exactly one attempt; a conflict is the caller's to handle.
            self.bounded("create", self.repository.create(&alias, &target_url)).await?;
            debug!(alias = %alias, "stored url under requested alias");
            return Ok(alias);
        }

        let max_attempts = self.policy.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            let alias = self.generator.generate();

            match self
                .bounded("create", self.repository.create(&alias, &target_url))
                .await
            {
                Ok(()) => {
                    debug!(alias = %alias, attempt, "stored url under generated alias");
                    return Ok(alias);
                }
                Err(StorageError::Conflict(_)) => {
                    debug!(alias = %alias, attempt, "generated alias collided, retrying");
                }
                Err(err) => return Err(RegistryError::Store(err)),
            }
        }

        warn!(attempts = max_attempts, "no free alias found");
        Err(RegistryError::OutOfAttempts {
            attempts: max_attempts,
        })
    }
}

#[async_trait]
impl<R: ReadRepository, G: Send + Sync + 'static> Resolver for AliasRegistry<R, G> {
    async fn resolve(&self, alias: &Alias) -> Result<String, RegistryError> {
        trace!(alias = %alias, "resolving alias");
        Ok(self.bounded("read", self.repository.read(alias)).await?)
    }
}

#[async_trait]
impl<R: DeleteRepository, G: Send + Sync + 'static> Remover for AliasRegistry<R, G> {
    async fn remove(&self, alias: &Alias) -> Result<(), RegistryError> {
        self.bounded("delete", self.repository.delete(alias)).await?;
        debug!(alias = %alias, "removed alias");
        Ok(())
    }
}
