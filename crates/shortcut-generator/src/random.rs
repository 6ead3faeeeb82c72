use crate::alphabet::Alphabet;
use crate::error::GeneratorError;
use crate::Generator;
use jiff::Timestamp;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shortcut_core::alias::MAX_LENGTH;
use shortcut_core::Alias;
use std::sync::atomic::{AtomicU64, Ordering};
use typed_builder::TypedBuilder;

/// Default number of characters in a generated alias.
pub const DEFAULT_LENGTH: usize = 7;

static INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Draws `length` characters independently and uniformly from `alphabet`.
///
/// A `length` of zero yields an empty string.
pub fn random_string<R: Rng>(rng: &mut R, alphabet: &Alphabet, length: usize) -> String {
    (0..length)
        .map(|_| alphabet.get(rng.random_range(0..alphabet.len())))
        .collect()
}

/// Configures a [`RandomGenerator`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct GeneratorSettings {
    /// Number of characters per alias, in `1..=64`.
    #[builder(default = DEFAULT_LENGTH)]
    pub length: usize,
    #[builder(default)]
    pub alphabet: Alphabet,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Random alias generator backed by a single time-seeded PRNG.
///
/// The PRNG is shared by every caller of the instance and guarded by a mutex.
/// Output is not cryptographically secure.
pub struct RandomGenerator {
    length: usize,
    alphabet: Alphabet,
    rng: Mutex<StdRng>,
}

impl RandomGenerator {
    pub fn new(settings: GeneratorSettings) -> Result<Self, GeneratorError> {
        let seed = time_seed();
        Self::with_seed(settings, seed)
    }

    /// Creates a generator with a fixed seed, for reproducible sequences.
    pub fn with_seed(settings: GeneratorSettings, seed: u64) -> Result<Self, GeneratorError> {
        if settings.length == 0 || settings.length > MAX_LENGTH {
            return Err(GeneratorError::InvalidLength {
                length: settings.length,
                max: MAX_LENGTH,
            });
        }

        Ok(Self {
            length: settings.length,
            alphabet: settings.alphabet,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        })
    }
}

impl std::fmt::Debug for RandomGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomGenerator")
            .field("length", &self.length)
            .field("alphabet", &self.alphabet)
            .finish_non_exhaustive()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> Alias {
        let mut rng = self.rng.lock();
        Alias::new_unchecked(random_string(&mut *rng, &self.alphabet, self.length))
    }
}

// Nanoseconds since the Unix epoch, mixed with an instance counter so two
// generators created within the same clock tick still diverge.
fn time_seed() -> u64 {
    let nanos = Timestamp::now().as_nanosecond() as u64;
    let instance = INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed);
    nanos ^ instance.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
