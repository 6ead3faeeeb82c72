//! Storage backends for the alias to URL mapping.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::{PostgresRepository, PostgresSettings};
pub use shortcut_core::{
    DeleteRepository, ReadRepository, Repository, StorageError, WriteRepository,
};
