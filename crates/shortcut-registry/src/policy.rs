use std::time::Duration;
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(3);

/// Retry and deadline policy for an [`AliasRegistry`](crate::AliasRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct RegistryPolicy {
    /// Number of generated candidates tried before giving up with
    /// [`RegistryError::OutOfAttempts`](shortcut_core::RegistryError::OutOfAttempts).
    /// Always at least one.
    #[builder(
        default = DEFAULT_MAX_ATTEMPTS,
        setter(transform = |attempts: u32| attempts.max(1))
    )]
    pub max_attempts: u32,
    /// Deadline applied to every individual store call. `None` disables it.
    #[builder(default = Some(DEFAULT_STORE_TIMEOUT))]
    pub store_timeout: Option<Duration>,
}

impl Default for RegistryPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}
