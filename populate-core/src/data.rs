//! Core data types: length hints, random seeds and engine configuration.

use std::fmt;

/// Maximum length hint handed to a generator.
///
/// `Length(0)` means "no constraint": the generator falls back to its own
/// default. Strings count characters, URLs and paths count bytes of their
/// serialized form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Length(pub usize);

impl Length {
    /// No constraint.
    pub const DEFAULT: Length = Length(0);

    /// Create a new length hint.
    pub fn new(value: usize) -> Self {
        Length(value)
    }

    /// Get the inner value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// True when no constraint was given.
    pub fn is_default(&self) -> bool {
        self.0 == 0
    }

    /// The constraint, or `default` when none was given.
    pub fn or(&self, default: usize) -> usize {
        if self.0 == 0 {
            default
        } else {
            self.0
        }
    }
}

impl From<usize> for Length {
    fn from(value: usize) -> Self {
        Length(value)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Length({})", self.0)
    }
}

/// SplitMix64 random state.
///
/// This is the default random source of a populator. Seeding it with
/// [`Seed::from_u64`] makes generation reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    /// Create a new seed from a single value.
    pub fn from_u64(value: u64) -> Self {
        let state = splitmix64_mix(value);
        let gamma = mix_gamma(state);
        Seed(state, gamma)
    }

    /// Produce the next output together with the advanced seed.
    pub fn next(self) -> (u64, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        (output, Seed(new_state, gamma))
    }

    /// Generate a random seed from the thread-local entropy source.
    pub fn random() -> Self {
        use rand::Rng;
        Seed::from_u64(rand::thread_rng().gen())
    }
}

impl rand::RngCore for Seed {
    fn next_u32(&mut self) -> u32 {
        (rand::RngCore::next_u64(self) >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let (output, advanced) = Seed::next(*self);
        *self = advanced;
        output
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = rand::RngCore::next_u64(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}, {})", self.0, self.1)
    }
}

/// How interface stubs share memoized accessor values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StubScope {
    /// Cache keyed by (interface, accessor): every stub of the same
    /// interface from one populator answers an accessor with the same value.
    #[default]
    Shared,
    /// Cache keyed by (stub, interface, accessor).
    PerInstance,
}

/// Configuration for the generation engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// Recursion depth at which generation returns an absent value.
    pub depth_limit: usize,

    /// Exclusive upper bound on array, collection and map sizes.
    pub container_limit: usize,

    /// Default maximum string length, in characters.
    pub string_length: usize,

    /// Default maximum URL length.
    pub url_length: usize,

    /// Default maximum file path length.
    pub path_length: usize,

    /// Interface stub cache keying.
    pub stub_scope: StubScope,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            depth_limit: 8,
            container_limit: 10,
            string_length: 45,
            url_length: 128,
            path_length: 128,
            stub_scope: StubScope::Shared,
        }
    }
}

impl Config {
    /// Set the recursion depth ceiling.
    pub fn with_depth_limit(mut self, depth: usize) -> Self {
        self.depth_limit = depth;
        self
    }

    /// Set the exclusive upper bound on container sizes.
    pub fn with_container_limit(mut self, limit: usize) -> Self {
        self.container_limit = limit;
        self
    }

    /// Set the default maximum string length.
    pub fn with_string_length(mut self, length: usize) -> Self {
        self.string_length = length;
        self
    }

    /// Set the default maximum URL length.
    pub fn with_url_length(mut self, length: usize) -> Self {
        self.url_length = length;
        self
    }

    /// Set the default maximum file path length.
    pub fn with_path_length(mut self, length: usize) -> Self {
        self.path_length = length;
        self
    }

    /// Set how interface stubs share cached values.
    pub fn with_stub_scope(mut self, scope: StubScope) -> Self {
        self.stub_scope = scope;
        self
    }
}

/// SplitMix64 mixing function for high-quality output.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Derive the SplitMix64 stream increment from a mixed state.
fn mix_gamma(mut z: u64) -> u64 {
    z = splitmix64_mix(z);
    // Ensure gamma is odd for maximal period
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15)
}
