//! Core types and traits for the shortcut URL shortener.
//!
//! This crate provides the alias type, the error taxonomy and the narrow
//! capability traits shared by the storage backends, the alias registry
//! and the HTTP gateway.

pub mod alias;
pub mod error;
pub mod registry;
pub mod repository;

pub use alias::Alias;
pub use error::{CoreError, RegistryError, StorageError};
pub use registry::{Remover, Resolver, Shortener};
pub use repository::{DeleteRepository, ReadRepository, Repository, WriteRepository};
