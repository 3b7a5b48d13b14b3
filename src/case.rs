use std::fmt;

use crate::adapter::{self, Digest, Input, Kernel, Shape};
use crate::hasher::{Hash32, Hash64, Seeded, StreamHash, TryKeyed, Unkeyed};
use crate::{Accumulator, BenchError, HASH_BUFFER_SIZE};

/// One benchmarked (algorithm, shape, input length) combination.
///
/// Cases are built by `const fn` so the registry can be a plain `static`
/// table. They are immutable and share nothing at run time: every run
/// opens its own [`Session`].
#[derive(Clone, Copy)]
pub struct Case {
    pub name: &'static str,
    pub shape: Shape,
    len: usize,
    kernel: Kernel,
}

#[allow(clippy::len_without_is_empty)]
impl Case {
    pub const fn new(name: &'static str, shape: Shape, kernel: Kernel) -> Self {
        Self {
            name,
            shape,
            len: HASH_BUFFER_SIZE,
            kernel,
        }
    }

    pub const fn unkeyed<H: Unkeyed + StreamHash>(name: &'static str) -> Self {
        Self::new(name, Shape::Unkeyed, adapter::unkeyed::<H>)
    }

    pub const fn unkeyed64<H: Unkeyed + Hash64>(name: &'static str) -> Self {
        Self::new(name, Shape::Unkeyed64, adapter::unkeyed64::<H>)
    }

    pub const fn seeded64<H: Seeded<u64> + Hash64>(name: &'static str, seed: u64) -> Self {
        Self::new(name, Shape::Seeded64 { seed }, adapter::seeded64::<H>)
    }

    pub const fn seeded32<H: Seeded<u32> + Hash32>(name: &'static str, seed: u32) -> Self {
        Self::new(name, Shape::Seeded32 { seed }, adapter::seeded32::<H>)
    }

    pub const fn keyed<H: TryKeyed + StreamHash>(name: &'static str, key_len: usize) -> Self {
        Self::new(name, Shape::Keyed { key_len }, adapter::keyed::<H>)
    }

    pub const fn keyed64<H: TryKeyed + Hash64>(name: &'static str, key_len: usize) -> Self {
        Self::new(name, Shape::Keyed64 { key_len }, adapter::keyed64::<H>)
    }

    pub const fn truncated<H: Unkeyed + Hash64, const N: usize>(name: &'static str) -> Self {
        assert!(N == 1 || N == 2 || N == 4, "truncation width must be 1, 2 or 4 bytes");
        Self::new(
            name,
            Shape::Truncated { width: N },
            adapter::truncated::<H, N>,
        )
    }

    /// Overrides the input length. Zero-length cases are rejected.
    pub const fn with_len(mut self, len: usize) -> Self {
        assert!(len > 0, "a case must hash at least one byte");
        self.len = len;
        self
    }

    /// Bytes hashed per iteration.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Opens a fresh run of this case.
    pub fn session(&self) -> Session<'_> {
        Session {
            case: self,
            data: vec![0u8; self.len],
            key: vec![0u8; self.shape.key_len()],
            guard: Accumulator::new(),
        }
    }
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("len", &self.len)
            .finish()
    }
}

/// State of one case run: the zero-filled input and key buffers, allocated
/// once and never mutated, and the run's guard.
pub struct Session<'c> {
    case: &'c Case,
    data: Vec<u8>,
    key: Vec<u8>,
    guard: Accumulator,
}

impl<'c> Session<'c> {
    pub fn case(&self) -> &'c Case {
        self.case
    }

    /// Runs one iteration of the case kernel.
    #[inline]
    pub fn step(&mut self) -> Result<Digest, BenchError> {
        let input = Input {
            data: &self.data,
            key: &self.key,
            seed: self.case.shape.seed(),
        };
        (self.case.kernel)(&input, &mut self.guard)
    }

    /// Iterations run so far.
    pub fn iterations(&self) -> u64 {
        self.guard.feeds()
    }

    pub fn guard(&self) -> &Accumulator {
        &self.guard
    }

    /// Closes the run by checking the guard.
    pub fn finish(self) -> Result<u64, BenchError> {
        self.guard.check()
    }
}
