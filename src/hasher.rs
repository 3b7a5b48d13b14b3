//! Calling conventions of the hash collaborators.
//!
//! Libraries disagree on how a hasher is built (plain, seeded, keyed and
//! possibly failing) and what it returns (a byte digest, a `u64`, a `u32`).
//! The traits below are the few conventions the adapters understand; every
//! benchmarked crate is bound to them here and nowhere else.

use core::hash::Hasher;
use std::io;

use blake2::digest::consts::U32;
use digest::{KeyInit, Mac};

use crate::BenchError;

// ---------------------------------------------------------------------------
// Digest side
// ---------------------------------------------------------------------------

/// Streaming hash with an arbitrary-length byte digest.
pub trait StreamHash {
    fn write(&mut self, data: &[u8]) -> Result<(), BenchError>;
    fn sum(self) -> Vec<u8>;
}

/// Streaming hash with a 64-bit integer digest.
pub trait Hash64 {
    fn write(&mut self, data: &[u8]) -> Result<(), BenchError>;
    fn sum64(&self) -> u64;
}

/// Streaming hash with a 32-bit integer digest.
pub trait Hash32 {
    fn write(&mut self, data: &[u8]) -> Result<(), BenchError>;
    fn sum32(&self) -> u32;
}

// ---------------------------------------------------------------------------
// Construction side
// ---------------------------------------------------------------------------

pub trait Unkeyed: Sized {
    fn new() -> Self;
}

pub trait Seeded<S>: Sized {
    fn with_seed(seed: S) -> Self;
}

/// Keyed construction that may reject the key.
pub trait TryKeyed: Sized {
    fn try_with_key(key: &[u8]) -> Result<Self, BenchError>;
}

// ---------------------------------------------------------------------------
// Cryptographic digests (RustCrypto + BLAKE3)
// ---------------------------------------------------------------------------

/// BLAKE2b with a 256-bit output.
pub type Blake2b256 = blake2::Blake2b<U32>;

/// Keyed BLAKE2b (MAC mode) with a 256-bit output.
pub type Blake2bMac256 = blake2::Blake2bMac<U32>;

// These all go through `io::Write`, the only write path in the set that can
// actually report an error.
macro_rules! impl_rustcrypto {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StreamHash for $ty {
                #[inline]
                fn write(&mut self, data: &[u8]) -> Result<(), BenchError> {
                    io::Write::write_all(self, data).map_err(BenchError::Write)
                }

                #[inline]
                fn sum(self) -> Vec<u8> {
                    digest::Digest::finalize(self).to_vec()
                }
            }

            impl Unkeyed for $ty {
                #[inline]
                fn new() -> Self {
                    <$ty as digest::Digest>::new()
                }
            }
        )*
    };
}

impl_rustcrypto!(
    md5::Md5,
    sha1::Sha1,
    sha2::Sha256,
    sha3::Sha3_224,
    sha3::Sha3_256,
    ripemd::Ripemd160,
    Blake2b256,
);

impl StreamHash for blake3::Hasher {
    #[inline]
    fn write(&mut self, data: &[u8]) -> Result<(), BenchError> {
        io::Write::write_all(self, data).map_err(BenchError::Write)
    }

    #[inline]
    fn sum(self) -> Vec<u8> {
        self.finalize().as_bytes().to_vec()
    }
}

impl Unkeyed for blake3::Hasher {
    #[inline]
    fn new() -> Self {
        blake3::Hasher::new()
    }
}

impl StreamHash for Blake2bMac256 {
    #[inline]
    fn write(&mut self, data: &[u8]) -> Result<(), BenchError> {
        Mac::update(self, data);
        Ok(())
    }

    #[inline]
    fn sum(self) -> Vec<u8> {
        Mac::finalize(self).into_bytes().to_vec()
    }
}

impl TryKeyed for Blake2bMac256 {
    #[inline]
    fn try_with_key(key: &[u8]) -> Result<Self, BenchError> {
        <Self as KeyInit>::new_from_slice(key).map_err(|_| BenchError::InvalidKey {
            len: key.len(),
            expected: "at most 64 bytes",
        })
    }
}

// ---------------------------------------------------------------------------
// Fast 64-bit hashes (core::hash::Hasher implementors)
// ---------------------------------------------------------------------------

macro_rules! impl_hasher64 {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Hash64 for $ty {
                #[inline]
                fn write(&mut self, data: &[u8]) -> Result<(), BenchError> {
                    Hasher::write(self, data);
                    Ok(())
                }

                #[inline]
                fn sum64(&self) -> u64 {
                    Hasher::finish(self)
                }
            }
        )*
    };
}

impl_hasher64!(
    twox_hash::XxHash64,
    fnv::FnvHasher,
    mur3::Hasher128,
    siphasher::sip::SipHasher24,
    siphasher::sip::SipHasher13,
    highway::HighwayHasher,
);

impl Unkeyed for twox_hash::XxHash64 {
    #[inline]
    fn new() -> Self {
        twox_hash::XxHash64::with_seed(0)
    }
}

impl Seeded<u64> for twox_hash::XxHash64 {
    #[inline]
    fn with_seed(seed: u64) -> Self {
        twox_hash::XxHash64::with_seed(seed)
    }
}

impl Unkeyed for fnv::FnvHasher {
    #[inline]
    fn new() -> Self {
        fnv::FnvHasher::default()
    }
}

// `finish` yields h1, the first half of the x64 128-bit result.
impl Unkeyed for mur3::Hasher128 {
    #[inline]
    fn new() -> Self {
        mur3::Hasher128::with_seed(0)
    }
}

fn sip_key(key: &[u8]) -> Result<&[u8; 16], BenchError> {
    key.try_into().map_err(|_| BenchError::InvalidKey {
        len: key.len(),
        expected: "exactly 16 bytes",
    })
}

impl TryKeyed for siphasher::sip::SipHasher24 {
    #[inline]
    fn try_with_key(key: &[u8]) -> Result<Self, BenchError> {
        Ok(siphasher::sip::SipHasher24::new_with_key(sip_key(key)?))
    }
}

impl TryKeyed for siphasher::sip::SipHasher13 {
    #[inline]
    fn try_with_key(key: &[u8]) -> Result<Self, BenchError> {
        Ok(siphasher::sip::SipHasher13::new_with_key(sip_key(key)?))
    }
}

// The key is four little-endian lanes.
impl TryKeyed for highway::HighwayHasher {
    #[inline]
    fn try_with_key(key: &[u8]) -> Result<Self, BenchError> {
        let key: &[u8; 32] = key.try_into().map_err(|_| BenchError::InvalidKey {
            len: key.len(),
            expected: "exactly 32 bytes",
        })?;
        let mut lanes = [0u64; 4];
        for (lane, chunk) in lanes.iter_mut().zip(key.chunks_exact(8)) {
            *lane = u64::from_le_bytes([
                chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5], chunk[6], chunk[7],
            ]);
        }
        Ok(highway::HighwayHasher::new(highway::Key(lanes)))
    }
}

impl Hash64 for xxhash_rust::xxh64::Xxh64 {
    #[inline]
    fn write(&mut self, data: &[u8]) -> Result<(), BenchError> {
        self.update(data);
        Ok(())
    }

    #[inline]
    fn sum64(&self) -> u64 {
        self.digest()
    }
}

impl Seeded<u64> for xxhash_rust::xxh64::Xxh64 {
    #[inline]
    fn with_seed(seed: u64) -> Self {
        xxhash_rust::xxh64::Xxh64::new(seed)
    }
}

// ---------------------------------------------------------------------------
// 32-bit hashes
// ---------------------------------------------------------------------------

impl Hash32 for twox_hash::XxHash32 {
    #[inline]
    fn write(&mut self, data: &[u8]) -> Result<(), BenchError> {
        Hasher::write(self, data);
        Ok(())
    }

    #[inline]
    fn sum32(&self) -> u32 {
        self.finish_32()
    }
}

impl Seeded<u32> for twox_hash::XxHash32 {
    #[inline]
    fn with_seed(seed: u32) -> Self {
        twox_hash::XxHash32::with_seed(seed)
    }
}

impl Hash32 for xxhash_rust::xxh32::Xxh32 {
    #[inline]
    fn write(&mut self, data: &[u8]) -> Result<(), BenchError> {
        self.update(data);
        Ok(())
    }

    #[inline]
    fn sum32(&self) -> u32 {
        self.digest()
    }
}

impl Seeded<u32> for xxhash_rust::xxh32::Xxh32 {
    #[inline]
    fn with_seed(seed: u32) -> Self {
        xxhash_rust::xxh32::Xxh32::new(seed)
    }
}
