use std::sync::Arc;

use crate::auth::Credentials;
use shortcut_core::{Remover, Resolver, Shortener};

/// Shared handler state.
///
/// Each handler reaches the registry through the one capability it needs.
#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    resolver: Arc<dyn Resolver>,
    remover: Arc<dyn Remover>,
    credentials: Arc<Credentials>,
}

impl AppState {
    /// Builds the state from a registry that provides all three capabilities.
    pub fn new<T>(registry: T, credentials: Credentials) -> Self
    where
        T: Shortener + Resolver + Remover,
    {
        let registry = Arc::new(registry);
        Self {
            shortener: registry.clone(),
            resolver: registry.clone(),
            remover: registry,
            credentials: Arc::new(credentials),
        }
    }

    /// Builds the state from independent capability implementations.
    pub fn from_parts(
        shortener: Arc<dyn Shortener>,
        resolver: Arc<dyn Resolver>,
        remover: Arc<dyn Remover>,
        credentials: Credentials,
    ) -> Self {
        Self {
            shortener,
            resolver,
            remover,
            credentials: Arc::new(credentials),
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn resolver(&self) -> &dyn Resolver {
        self.resolver.as_ref()
    }

    pub fn remover(&self) -> &dyn Remover {
        self.remover.as_ref()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
