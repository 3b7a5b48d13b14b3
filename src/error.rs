use std::io;

use thiserror::Error;

// Write and key errors come from a broken collaborator or a broken case
// binding, never from the environment, so nothing here is retried.

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("write into hash instance failed: {0}")]
    Write(#[source] io::Error),

    #[error("key of length {len} rejected, expected {expected}")]
    InvalidKey { len: usize, expected: &'static str },

    #[error("seed {seed} does not fit in {bits} bits")]
    InvalidSeed { seed: u64, bits: u32 },

    #[error("accumulator guard ended at zero after {iterations} iterations")]
    GuardFailure { iterations: u64 },
}

impl BenchError {
    /// Fatal errors abort the whole run. A guard failure only fails its own case.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, BenchError::GuardFailure { .. })
    }
}
