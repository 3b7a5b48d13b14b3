//! The table of benchmarked cases.

use crate::hasher::{Blake2b256, Blake2bMac256};
use crate::{Case, HIGHWAY_KEY_SIZE, KEY_SIZE, SEED};

use highway::HighwayHasher;
use siphasher::sip::{SipHasher13, SipHasher24};
use twox_hash::{XxHash32, XxHash64};
use xxhash_rust::{xxh32::Xxh32, xxh64::Xxh64};

pub static CASES: &[Case] = &[
    // --- cryptographic digests -------------------------------------------
    Case::unkeyed::<md5::Md5>("md5"),
    Case::unkeyed::<sha1::Sha1>("sha1"),
    Case::unkeyed::<sha2::Sha256>("sha256"),
    Case::unkeyed::<sha3::Sha3_224>("sha3-224"),
    Case::unkeyed::<sha3::Sha3_256>("sha3-256"),
    Case::unkeyed::<ripemd::Ripemd160>("ripemd160"),
    Case::unkeyed::<Blake2b256>("blake2b-256"),
    Case::unkeyed::<blake3::Hasher>("blake3"),
    // --- keyed -----------------------------------------------------------
    Case::keyed::<Blake2bMac256>("blake2b-256-mac", KEY_SIZE),
    Case::keyed64::<SipHasher24>("siphash-2-4", KEY_SIZE),
    Case::keyed64::<SipHasher13>("siphash-1-3", KEY_SIZE),
    Case::keyed64::<HighwayHasher>("highwayhash-64", HIGHWAY_KEY_SIZE),
    // --- fast 64-bit -----------------------------------------------------
    Case::unkeyed64::<mur3::Hasher128>("murmur3-x64"),
    Case::unkeyed64::<fnv::FnvHasher>("fnv1a-64"),
    Case::unkeyed64::<XxHash64>("xxh64"),
    Case::seeded64::<XxHash64>("xxh64-seeded", SEED),
    Case::seeded64::<Xxh64>("xxh64-seeded-xxhash-rust", SEED),
    // --- fast 32-bit -----------------------------------------------------
    Case::seeded32::<XxHash32>("xxh32-seeded", SEED as u32),
    Case::seeded32::<Xxh32>("xxh32-seeded-xxhash-rust", SEED as u32),
    // --- output narrowing ------------------------------------------------
    Case::truncated::<XxHash64, 4>("xxh64-to-32"),
    Case::truncated::<XxHash64, 2>("xxh64-to-16"),
    Case::truncated::<XxHash64, 1>("xxh64-to-8"),
];

pub fn find(name: &str) -> Option<&'static Case> {
    CASES.iter().find(|case| case.name == name)
}

/// Cases whose name contains `filter`; all cases when there is no filter.
pub fn select<'a>(cases: &'a [Case], filter: Option<&'a str>) -> impl Iterator<Item = &'a Case> {
    cases
        .iter()
        .filter(move |case| filter.map_or(true, |f| case.name.contains(f)))
}
