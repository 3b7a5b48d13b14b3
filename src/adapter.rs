//! Per-iteration kernels, one per adapter shape.
//!
//! Every kernel does the same four things: build a fresh hash instance,
//! write the whole input in one call, extract the digest and fold a slice of
//! it into the guard. Only the calling convention differs. A failed write or
//! a rejected key is returned immediately; kernels never retry.

use crate::hasher::{Hash32, Hash64, Seeded, StreamHash, TryKeyed, Unkeyed};
use crate::{Accumulator, BenchError};

/// Shape tag of a case, carrying the parameters its kernel needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Unkeyed,
    Unkeyed64,
    Seeded64 { seed: u64 },
    Seeded32 { seed: u32 },
    Keyed { key_len: usize },
    Keyed64 { key_len: usize },
    /// Top `width` bytes of an unkeyed 64-bit digest.
    Truncated { width: usize },
}

impl Shape {
    pub fn seed(&self) -> u64 {
        match *self {
            Shape::Seeded64 { seed } => seed,
            Shape::Seeded32 { seed } => u64::from(seed),
            _ => 0,
        }
    }

    pub fn key_len(&self) -> usize {
        match *self {
            Shape::Keyed { key_len } | Shape::Keyed64 { key_len } => key_len,
            _ => 0,
        }
    }
}

/// What a kernel sees of its session.
#[derive(Debug, Clone, Copy)]
pub struct Input<'a> {
    pub data: &'a [u8],
    pub key: &'a [u8],
    pub seed: u64,
}

/// A monomorphized adapter, e.g. `adapter::unkeyed::<sha2::Sha256>`.
pub type Kernel = fn(&Input<'_>, &mut Accumulator) -> Result<Digest, BenchError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Digest {
    Bytes(Vec<u8>),
    U64(u64),
    U32(u32),
    /// Leading `len` bytes of a 64-bit digest, big-endian.
    Prefix { bytes: [u8; 4], len: usize },
}

impl Digest {
    /// Integers are rendered big-endian, so a prefix is a prefix of its source.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Digest::Bytes(bytes) => bytes.clone(),
            Digest::U64(v) => v.to_be_bytes().to_vec(),
            Digest::U32(v) => v.to_be_bytes().to_vec(),
            Digest::Prefix { bytes, len } => bytes[..*len].to_vec(),
        }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

// ---------------------------------------------------------------------------
// Kernels
// ---------------------------------------------------------------------------

#[inline]
fn fold_first_byte(guard: &mut Accumulator, sum: &[u8]) {
    guard.add(sum.first().copied().map_or(0, u64::from));
}

pub fn unkeyed<H: Unkeyed + StreamHash>(
    input: &Input<'_>,
    guard: &mut Accumulator,
) -> Result<Digest, BenchError> {
    let mut h = H::new();
    h.write(input.data)?;
    let sum = h.sum();
    fold_first_byte(guard, &sum);
    Ok(Digest::Bytes(sum))
}

pub fn unkeyed64<H: Unkeyed + Hash64>(
    input: &Input<'_>,
    guard: &mut Accumulator,
) -> Result<Digest, BenchError> {
    let mut h = H::new();
    h.write(input.data)?;
    let sum = h.sum64();
    guard.add(sum);
    Ok(Digest::U64(sum))
}

pub fn seeded64<H: Seeded<u64> + Hash64>(
    input: &Input<'_>,
    guard: &mut Accumulator,
) -> Result<Digest, BenchError> {
    let mut h = H::with_seed(input.seed);
    h.write(input.data)?;
    let sum = h.sum64();
    guard.add(sum);
    Ok(Digest::U64(sum))
}

/// A seed wider than 32 bits is returned as [`BenchError::InvalidSeed`]
/// rather than silently truncated.
pub fn seeded32<H: Seeded<u32> + Hash32>(
    input: &Input<'_>,
    guard: &mut Accumulator,
) -> Result<Digest, BenchError> {
    let seed = u32::try_from(input.seed).map_err(|_| BenchError::InvalidSeed {
        seed: input.seed,
        bits: 32,
    })?;
    let mut h = H::with_seed(seed);
    h.write(input.data)?;
    let sum = h.sum32();
    guard.add(u64::from(sum));
    Ok(Digest::U32(sum))
}

/// A rejected key is returned as [`BenchError::InvalidKey`]; the kernel
/// never falls back to an unkeyed or default instance.
pub fn keyed<H: TryKeyed + StreamHash>(
    input: &Input<'_>,
    guard: &mut Accumulator,
) -> Result<Digest, BenchError> {
    let mut h = H::try_with_key(input.key)?;
    h.write(input.data)?;
    let sum = h.sum();
    fold_first_byte(guard, &sum);
    Ok(Digest::Bytes(sum))
}

pub fn keyed64<H: TryKeyed + Hash64>(
    input: &Input<'_>,
    guard: &mut Accumulator,
) -> Result<Digest, BenchError> {
    let mut h = H::try_with_key(input.key)?;
    h.write(input.data)?;
    let sum = h.sum64();
    guard.add(sum);
    Ok(Digest::U64(sum))
}

/// Hashes like [`unkeyed64`] and keeps the top `N` bytes, isolating the cost
/// of narrowing the output. `N` is 1, 2 or 4 (checked by
/// [`crate::Case::truncated`]).
pub fn truncated<H: Unkeyed + Hash64, const N: usize>(
    input: &Input<'_>,
    guard: &mut Accumulator,
) -> Result<Digest, BenchError> {
    let mut h = H::new();
    h.write(input.data)?;
    let sum = h.sum64();
    let bytes = leading_bytes::<N>(sum);
    guard.add(sum >> (64 - 8 * N));
    Ok(Digest::Prefix { bytes, len: N })
}

/// Top `N` bytes of `sum` in big-endian order, zero padded to four bytes.
#[inline(always)]
pub fn leading_bytes<const N: usize>(sum: u64) -> [u8; 4] {
    let mut out = [0u8; 4];
    out[..N].copy_from_slice(&sum.to_be_bytes()[..N]);
    out
}
