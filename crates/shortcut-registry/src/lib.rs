//! Alias registry.
//!
//! This crate turns "shorten this URL" requests into stored, unique aliases
//! by combining a [`Generator`](shortcut_generator::Generator) with a storage
//! backend, and forwards resolve/delete requests to the store. Core types are
//! re-exported from `shortcut_core`.

pub mod policy;
pub mod registry;

pub use policy::RegistryPolicy;
pub use registry::AliasRegistry;
pub use shortcut_core::{RegistryError, Remover, Resolver, Shortener};
