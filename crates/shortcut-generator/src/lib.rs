pub mod alphabet;
pub mod error;
pub mod random;

pub use alphabet::Alphabet;
pub use error::GeneratorError;
pub use random::{random_string, GeneratorSettings, RandomGenerator};

use shortcut_core::Alias;

/// Trait for generating candidate aliases.
///
/// Implementations are pure generators that don't interact with storage.
/// Candidates are not guaranteed to be unique; the registry retries on
/// collision.
pub trait Generator: Send + Sync + 'static {
    /// Produces the next candidate alias.
    fn generate(&self) -> Alias;
}

impl<G: Generator + ?Sized> Generator for std::sync::Arc<G> {
    fn generate(&self) -> Alias {
        (**self).generate()
    }
}
